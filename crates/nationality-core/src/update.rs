// crates/nationality-core/src/update.rs
//! Persisting a committed nationality.
//!
//! [`UpdateFlow`] wraps an external [`NationalityMutation`] (usually an HTTP
//! call to the profile endpoint) and guarantees at most one request in
//! flight per picker instance. A submission made while another one is
//! pending is dropped, not queued.
//!
//! The flow is built for a single-threaded UI event loop: state lives in
//! `Rc`/`Cell`, futures are `!Send`, and nothing here spawns tasks.

use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// The external collaborator that stores a nationality on the user profile.
///
/// `None` clears the nationality. The returned future resolves once the
/// backend has accepted or rejected the change; retries and timeouts are the
/// implementor's business.
pub trait NationalityMutation {
    type Error: fmt::Display + 'static;

    fn mutate(&self, code: Option<String>) -> LocalBoxFuture<'static, Result<(), Self::Error>>;
}

/// Adapter turning a closure into a [`NationalityMutation`].
///
/// ```rust
/// use futures::future::{self, FutureExt};
/// use nationality_core::update::{mutation_fn, UpdateFlow};
///
/// let flow = UpdateFlow::new(mutation_fn(|_code: Option<String>| {
///     future::ready(Ok::<(), String>(())).boxed_local()
/// }));
/// assert!(!flow.is_updating());
/// ```
pub fn mutation_fn<F, E>(f: F) -> MutationFn<F>
where
    F: Fn(Option<String>) -> LocalBoxFuture<'static, Result<(), E>>,
    E: fmt::Display + 'static,
{
    MutationFn(f)
}

pub struct MutationFn<F>(F);

impl<F, E> NationalityMutation for MutationFn<F>
where
    F: Fn(Option<String>) -> LocalBoxFuture<'static, Result<(), E>>,
    E: fmt::Display + 'static,
{
    type Error = E;

    fn mutate(&self, code: Option<String>) -> LocalBoxFuture<'static, Result<(), E>> {
        (self.0)(code)
    }
}

/// What happened to one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<E> {
    /// The collaborator accepted the change.
    Persisted,
    /// Another submission was in flight; the collaborator was not called.
    Skipped,
    /// The collaborator rejected the change.
    Failed(E),
}

impl<E> SubmitOutcome<E> {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Last status reported by the collaborator, for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UpdateStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

type ErrorHandler<E> = Rc<dyn Fn(&E)>;
type SuccessHandler = Rc<dyn Fn(Option<&str>)>;

struct FlowInner<M: NationalityMutation> {
    mutation: M,
    updating: Rc<Cell<bool>>,
    alive: Cell<bool>,
    status: RefCell<UpdateStatus>,
    on_error: RefCell<Option<ErrorHandler<M::Error>>>,
    on_success: RefCell<Option<SuccessHandler>>,
}

/// Clears the in-flight flag when dropped, on every exit path: success,
/// rejection, a panicking collaborator, or a future dropped mid-flight.
struct UpdateGuard {
    updating: Rc<Cell<bool>>,
}

impl UpdateGuard {
    fn acquire(updating: &Rc<Cell<bool>>) -> Option<Self> {
        if updating.replace(true) {
            return None;
        }
        Some(Self {
            updating: Rc::clone(updating),
        })
    }
}

impl Drop for UpdateGuard {
    fn drop(&mut self) {
        self.updating.set(false);
    }
}

/// Per-widget update flow. Cloning shares the same guard and handlers.
pub struct UpdateFlow<M: NationalityMutation> {
    inner: Rc<FlowInner<M>>,
}

impl<M: NationalityMutation> Clone for UpdateFlow<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M: NationalityMutation> fmt::Debug for UpdateFlow<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateFlow")
            .field("is_updating", &self.inner.updating.get())
            .field("alive", &self.inner.alive.get())
            .field("status", &*self.inner.status.borrow())
            .finish()
    }
}

impl<M: NationalityMutation + 'static> UpdateFlow<M> {
    pub fn new(mutation: M) -> Self {
        Self {
            inner: Rc::new(FlowInner {
                mutation,
                updating: Rc::new(Cell::new(false)),
                alive: Cell::new(true),
                status: RefCell::new(UpdateStatus::Idle),
                on_error: RefCell::new(None),
                on_success: RefCell::new(None),
            }),
        }
    }

    /// Called with the collaborator's error after a failed submission.
    pub fn with_error_handler(self, handler: impl Fn(&M::Error) + 'static) -> Self {
        self.set_error_handler(handler);
        self
    }

    /// Called with the persisted code after a successful submission.
    pub fn with_success_handler(self, handler: impl Fn(Option<&str>) + 'static) -> Self {
        self.set_success_handler(handler);
        self
    }

    pub fn set_error_handler(&self, handler: impl Fn(&M::Error) + 'static) {
        *self.inner.on_error.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn set_success_handler(&self, handler: impl Fn(Option<&str>) + 'static) {
        *self.inner.on_success.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn is_updating(&self) -> bool {
        self.inner.updating.get()
    }

    pub fn status(&self) -> UpdateStatus {
        self.inner.status.borrow().clone()
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.get()
    }

    /// Marks the owning widget as gone. Submissions settling afterwards no
    /// longer touch status or call handlers.
    pub fn unmount(&self) {
        self.inner.alive.set(false);
    }

    /// Persist `code` through the collaborator.
    ///
    /// The in-flight check happens right here, not when the future is first
    /// polled: if a submission is already pending the returned future
    /// resolves to [`SubmitOutcome::Skipped`] and the collaborator is not
    /// called. Otherwise the collaborator is invoked immediately and the
    /// guard is held until its future settles.
    pub fn submit(&self, code: Option<&str>) -> impl Future<Output = SubmitOutcome<M::Error>> {
        let code = code.map(str::to_owned);
        let inner = Rc::clone(&self.inner);

        let attempt = match UpdateGuard::acquire(&inner.updating) {
            Some(guard) => {
                debug!(code = ?code, "submitting nationality");
                // A collaborator that panics here never reaches Pending.
                let call = inner.mutation.mutate(code.clone());
                if inner.alive.get() {
                    *inner.status.borrow_mut() = UpdateStatus::Pending;
                }
                Some((guard, call))
            }
            None => {
                debug!(code = ?code, "nationality update already in flight, dropping submit");
                None
            }
        };

        async move {
            let Some((guard, call)) = attempt else {
                return SubmitOutcome::Skipped;
            };
            let result = call.await;
            drop(guard);
            inner.settle(code.as_deref(), result)
        }
    }
}

impl<M: NationalityMutation> FlowInner<M> {
    fn settle(&self, code: Option<&str>, result: Result<(), M::Error>) -> SubmitOutcome<M::Error> {
        let alive = self.alive.get();
        match result {
            Ok(()) => {
                info!(code = ?code, "nationality updated");
                if alive {
                    *self.status.borrow_mut() = UpdateStatus::Succeeded;
                    let handler = self.on_success.borrow().clone();
                    if let Some(handler) = handler {
                        handler(code);
                    }
                }
                SubmitOutcome::Persisted
            }
            Err(err) => {
                warn!(code = ?code, error = %err, "nationality update failed");
                if alive {
                    *self.status.borrow_mut() = UpdateStatus::Failed(err.to_string());
                    let handler = self.on_error.borrow().clone();
                    if let Some(handler) = handler {
                        handler(&err);
                    }
                }
                SubmitOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::{self, FutureExt};
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::pin::pin;

    /// Records calls and lets the test settle each one by hand.
    #[derive(Default)]
    struct ScriptedMutation {
        calls: RefCell<Vec<Option<String>>>,
        pending: RefCell<Vec<oneshot::Sender<Result<(), String>>>>,
    }

    impl NationalityMutation for Rc<ScriptedMutation> {
        type Error = String;

        fn mutate(&self, code: Option<String>) -> LocalBoxFuture<'static, Result<(), String>> {
            self.calls.borrow_mut().push(code);
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().push(tx);
            rx.map(|r| r.unwrap_or_else(|_| Err("cancelled".into())))
                .boxed_local()
        }
    }

    impl ScriptedMutation {
        fn settle_next(&self, result: Result<(), String>) {
            let tx = self.pending.borrow_mut().remove(0);
            tx.send(result).unwrap();
        }
    }

    #[test]
    fn second_submit_while_pending_is_dropped() {
        let mutation = Rc::new(ScriptedMutation::default());
        let flow = UpdateFlow::new(Rc::clone(&mutation));

        block_on(async {
            let mut first = pin!(flow.submit(Some("KR")));
            assert!(futures::poll!(&mut first).is_pending());
            assert!(flow.is_updating());
            assert_eq!(flow.status(), UpdateStatus::Pending);

            let second = flow.submit(Some("JP")).await;
            assert!(second.is_skipped());
            assert_eq!(*mutation.calls.borrow(), vec![Some("KR".to_string())]);

            mutation.settle_next(Ok(()));
            assert!(first.await.is_persisted());
        });

        assert!(!flow.is_updating());
        assert_eq!(flow.status(), UpdateStatus::Succeeded);
    }

    #[test]
    fn submit_is_accepted_again_after_failure() {
        let mutation = Rc::new(ScriptedMutation::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let flow = UpdateFlow::new(Rc::clone(&mutation))
            .with_error_handler(move |e: &String| sink.borrow_mut().push(e.clone()));

        block_on(async {
            let first = flow.submit(Some("KR"));
            mutation.settle_next(Err("boom".into()));
            assert_eq!(first.await, SubmitOutcome::Failed("boom".to_string()));
            assert!(!flow.is_updating());

            let retry = flow.submit(Some("KR"));
            assert!(flow.is_updating());
            mutation.settle_next(Ok(()));
            assert!(retry.await.is_persisted());
        });

        assert_eq!(*seen.borrow(), vec!["boom".to_string()]);
        assert_eq!(mutation.calls.borrow().len(), 2);
    }

    #[test]
    fn synchronous_rejection_releases_guard() {
        let flow = UpdateFlow::new(mutation_fn(|_code: Option<String>| {
            future::ready(Err::<(), _>("offline".to_string())).boxed_local()
        }));
        let outcome = block_on(flow.submit(None));
        assert_eq!(outcome.error().map(String::as_str), Some("offline"));
        assert!(!flow.is_updating());
        assert_eq!(flow.status(), UpdateStatus::Failed("offline".into()));
    }

    #[test]
    fn panicking_collaborator_releases_guard() {
        let flow = UpdateFlow::new(mutation_fn(
            |_code: Option<String>| -> LocalBoxFuture<'static, Result<(), String>> {
                panic!("collaborator exploded")
            },
        ));
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _ = flow.submit(Some("KR"));
        }));
        assert!(result.is_err());
        assert!(!flow.is_updating());
        assert_eq!(flow.status(), UpdateStatus::Idle);
    }

    #[test]
    fn dropping_pending_submission_releases_guard() {
        let mutation = Rc::new(ScriptedMutation::default());
        let flow = UpdateFlow::new(Rc::clone(&mutation));
        let pending = flow.submit(Some("KR"));
        assert!(flow.is_updating());
        drop(pending);
        assert!(!flow.is_updating());
    }

    #[test]
    fn unmounted_flow_discards_late_results() {
        let mutation = Rc::new(ScriptedMutation::default());
        let errors = Rc::new(Cell::new(0));
        let count = Rc::clone(&errors);
        let flow = UpdateFlow::new(Rc::clone(&mutation))
            .with_error_handler(move |_e: &String| count.set(count.get() + 1));

        let pending = flow.submit(Some("KR"));
        flow.unmount();
        mutation.settle_next(Err("late".into()));
        let outcome = block_on(pending);

        assert!(outcome.error().is_some());
        assert_eq!(errors.get(), 0);
        assert_eq!(flow.status(), UpdateStatus::Pending);
        assert!(!flow.is_updating());
    }

    #[test]
    fn success_handler_receives_code() {
        let got = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&got);
        let flow = UpdateFlow::new(mutation_fn(|_code: Option<String>| {
            future::ready(Ok::<(), String>(())).boxed_local()
        }))
        .with_success_handler(move |code| *sink.borrow_mut() = Some(code.map(str::to_owned)));

        assert!(block_on(flow.submit(Some("DE"))).is_persisted());
        assert_eq!(*got.borrow(), Some(Some("DE".to_string())));
    }
}
