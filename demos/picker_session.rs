//! Drives a headless nationality picker the way a browser front-end would.
//!
//! The picker persists each commit immediately through an in-process
//! "profile API" that fails the first request, showing the single in-flight
//! guard and the error path.

use futures::executor::LocalPool;
use futures::future::{self, FutureExt, LocalBoxFuture};
use futures::task::LocalSpawnExt;
use nationality_rs::prelude::*;
use std::cell::Cell;
use std::sync::Arc;

struct FlakyProfileApi {
    requests: Cell<u32>,
}

impl NationalityMutation for FlakyProfileApi {
    type Error = String;

    fn mutate(&self, code: Option<String>) -> LocalBoxFuture<'static, Result<(), String>> {
        let n = self.requests.get() + 1;
        self.requests.set(n);
        println!("  -> PATCH /profile nationality={code:?} (request #{n})");
        let reply = if n == 1 { Err("503 Service Unavailable".to_string()) } else { Ok(()) };
        future::ready(reply).boxed_local()
    }
}

fn main() {
    let db = Arc::new(NationalityDb::builtin());

    let flow = UpdateFlow::new(FlakyProfileApi { requests: Cell::new(0) })
        .with_error_handler(|err: &String| println!("  !! could not save: {err}"))
        .with_success_handler(|code| println!("  ok saved {code:?}"));

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let strategy = Immediate::new(flow.clone(), move |task: LocalBoxFuture<'static, ()>| {
        if let Err(err) = spawner.spawn_local(task) {
            eprintln!("cannot schedule update: {err}");
        }
    });

    let mut picker = NationalitySelector::with_strategy(Arc::clone(&db), strategy)
        .on_change(|code| println!("changed to {code:?}"));
    picker.apply_profile(&ProfileSnapshot::Ready(Some("JP".into())));
    println!("profile says: {}", picker.selected_country().name());

    for attempt in 1..=2 {
        println!("\nattempt {attempt}");
        picker.handle_key(SelectorKey::Enter);
        for c in "kor".chars() {
            picker.handle_key(SelectorKey::Char(c));
        }
        picker.handle_key(SelectorKey::Down);
        let outcome = picker.handle_key(SelectorKey::Enter);
        println!("outcome: {outcome:?}");
        pool.run_until_stalled();
        println!("status: {:?}", flow.status());
    }

    // The profile reader would refresh after a successful save.
    picker.apply_profile(&ProfileSnapshot::Ready(Some("KR".into())));
    let selected = picker.selected_country();
    println!("\nnow showing: {} {}", selected.flag(), selected.name());
}
