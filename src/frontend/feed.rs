//! One typed feed of file-list snapshots per dashboard, regardless of
//! transport. The feed owns the polling timer; push notifications and
//! user actions reuse the same `refresh` handle. Concurrent refreshes
//! are last-write-wins, no version check.

use std::rc::Rc;

use gloo_timers::callback::Interval;
use leptos::{create_signal, on_cleanup, spawn_local, ReadSignal, WriteSignal, SignalSet};

use crate::ApiError;

pub struct Feed<T: 'static> {
    pub snapshot: ReadSignal<Option<T>>,
    pub set_snapshot: WriteSignal<Option<T>>,
    pub error: ReadSignal<Option<ApiError>>,
    refresh: Rc<dyn Fn()>,
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self {
            snapshot: self.snapshot,
            set_snapshot: self.set_snapshot,
            error: self.error,
            refresh: Rc::clone(&self.refresh),
        }
    }
}

impl<T> Feed<T> {
    pub fn refresh(&self) {
        (self.refresh)();
    }
}

/// Starts a feed: one fetch immediately, then one per `interval_ms`.
/// The timer dies with the owning scope. A failed fetch sets `error`
/// and leaves the last good snapshot in place; consumers decide how to
/// degrade.
pub fn use_feed<T, Fut>(interval_ms: u32, fetch: impl Fn() -> Fut + 'static) -> Feed<T>
where
    T: Clone + 'static,
    Fut: std::future::Future<Output = Result<T, ApiError>> + 'static,
{
    let (snapshot, set_snapshot) = create_signal(None::<T>);
    let (error, set_error) = create_signal(None::<ApiError>);

    let fetch = Rc::new(fetch);
    let refresh: Rc<dyn Fn()> = Rc::new(move || {
        let fetch = Rc::clone(&fetch);
        spawn_local(async move {
            match fetch().await {
                Ok(value) => {
                    set_snapshot.set(Some(value));
                    set_error.set(None);
                }
                Err(err) => set_error.set(Some(err)),
            }
        });
    });

    refresh();
    let tick = Rc::clone(&refresh);
    let interval = Interval::new(interval_ms, move || tick());
    on_cleanup(move || drop(interval));

    Feed {
        snapshot,
        set_snapshot,
        error,
        refresh,
    }
}
