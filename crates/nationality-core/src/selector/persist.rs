// crates/nationality-core/src/selector/persist.rs
//! When a committed selection gets persisted.
//!
//! The selector only announces commits. A [`PersistStrategy`] injected at
//! construction decides what happens next:
//!
//! - [`Deferred`]: nothing; an external submit action (e.g. the comment
//!   form's "post" button) calls [`UpdateFlow::submit`] later.
//! - [`Immediate`]: the commit is pushed through an [`UpdateFlow`] right away
//!   and the resulting future is handed to a spawner owned by the host
//!   (`wasm_bindgen_futures::spawn_local`, a `LocalPool`, ...).

use crate::update::{NationalityMutation, UpdateFlow};
use futures::future::LocalBoxFuture;
use futures::FutureExt;

pub trait PersistStrategy {
    fn on_commit(&self, code: Option<&str>);
}

/// Leave persistence to the embedding form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deferred;

impl PersistStrategy for Deferred {
    fn on_commit(&self, _code: Option<&str>) {}
}

/// Persist every commit as soon as it happens.
pub struct Immediate<M: NationalityMutation, S> {
    flow: UpdateFlow<M>,
    spawn: S,
}

impl<M, S> Immediate<M, S>
where
    M: NationalityMutation + 'static,
    S: Fn(LocalBoxFuture<'static, ()>),
{
    pub fn new(flow: UpdateFlow<M>, spawn: S) -> Self {
        Self { flow, spawn }
    }

    pub fn flow(&self) -> &UpdateFlow<M> {
        &self.flow
    }
}

impl<M, S> PersistStrategy for Immediate<M, S>
where
    M: NationalityMutation + 'static,
    S: Fn(LocalBoxFuture<'static, ()>),
{
    fn on_commit(&self, code: Option<&str>) {
        // Errors reach the flow's handler; the outcome itself is not needed here.
        let submission = self.flow.submit(code).map(|_| ());
        (self.spawn)(submission.boxed_local());
    }
}
