//! Shared completion state behind a [`Will`](crate::Will) and its
//! [`Promise`](crate::Promise).

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// A callback run once with the terminal result.
pub(crate) type Listener<T, E> = Box<dyn FnOnce(&Result<T, E>) + Send + 'static>;

/// The terminal result, shared between every consumer.
pub(crate) type Outcome<T, E> = Arc<Result<T, E>>;

enum Slot<T, E> {
    Pending {
        listeners: Vec<Listener<T, E>>,
        wakers: Vec<Waker>,
    },
    Done(Outcome<T, E>),
}

/// Single-assignment cell guarded by a mutex, with a condvar for blocking
/// waiters and a waker list for async ones.
pub(crate) struct Shared<T, E> {
    slot: Mutex<Slot<T, E>>,
    condvar: Condvar,
}

impl<T, E> Shared<T, E> {
    pub(crate) fn pending() -> Self {
        Self {
            slot: Mutex::new(Slot::Pending {
                listeners: Vec::new(),
                wakers: Vec::new(),
            }),
            condvar: Condvar::new(),
        }
    }

    pub(crate) fn done(result: Result<T, E>) -> Self {
        Self {
            slot: Mutex::new(Slot::Done(Arc::new(result))),
            condvar: Condvar::new(),
        }
    }

    /// Move the cell out of the pending state.
    ///
    /// Returns `false` without touching the stored result if the cell was
    /// already complete. Listeners run on the calling thread after the lock
    /// has been released, before blocked and async waiters are released.
    /// A panicking listener is logged and skipped; waiters are released even
    /// if the calling thread unwinds.
    pub(crate) fn complete(&self, result: Result<T, E>) -> bool {
        let outcome = Arc::new(result);

        let (listeners, wakers) = {
            let mut slot = self.slot.lock();
            match std::mem::replace(&mut *slot, Slot::Done(Arc::clone(&outcome))) {
                Slot::Pending { listeners, wakers } => (listeners, wakers),
                previous @ Slot::Done(_) => {
                    *slot = previous;
                    return false;
                }
            }
        };

        let _release = Release {
            condvar: &self.condvar,
            wakers,
        };
        for listener in listeners {
            run_listener(listener, &outcome);
        }
        true
    }

    /// Register a listener, running it right away if the cell is complete.
    pub(crate) fn subscribe(&self, listener: Listener<T, E>) {
        let outcome = {
            let mut slot = self.slot.lock();
            match &mut *slot {
                Slot::Pending { listeners, .. } => {
                    listeners.push(listener);
                    return;
                }
                Slot::Done(outcome) => Arc::clone(outcome),
            }
        };
        run_listener(listener, &outcome);
    }

    pub(crate) fn peek(&self) -> Option<Outcome<T, E>> {
        match &*self.slot.lock() {
            Slot::Pending { .. } => None,
            Slot::Done(outcome) => Some(Arc::clone(outcome)),
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        matches!(&*self.slot.lock(), Slot::Done(_))
    }

    /// Block the current thread until the cell is complete.
    pub(crate) fn wait(&self) -> Outcome<T, E> {
        let mut slot = self.slot.lock();
        loop {
            if let Slot::Done(outcome) = &*slot {
                return Arc::clone(outcome);
            }
            self.condvar.wait(&mut slot);
        }
    }

    /// Block until the cell is complete or `timeout` elapses.
    pub(crate) fn wait_for(&self, timeout: Duration) -> Option<Outcome<T, E>> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.wait());
        };
        let mut slot = self.slot.lock();
        loop {
            if let Slot::Done(outcome) = &*slot {
                return Some(Arc::clone(outcome));
            }
            if self.condvar.wait_until(&mut slot, deadline).timed_out() {
                return match &*slot {
                    Slot::Done(outcome) => Some(Arc::clone(outcome)),
                    Slot::Pending { .. } => None,
                };
            }
        }
    }

    pub(crate) fn poll(&self, cx: &mut Context<'_>) -> Poll<Outcome<T, E>> {
        let mut slot = self.slot.lock();
        match &mut *slot {
            Slot::Done(outcome) => Poll::Ready(Arc::clone(outcome)),
            Slot::Pending { wakers, .. } => {
                if !wakers.iter().any(|w| w.will_wake(cx.waker())) {
                    wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }

    pub(crate) fn listener_count(&self) -> usize {
        match &*self.slot.lock() {
            Slot::Pending { listeners, .. } => listeners.len(),
            Slot::Done(_) => 0,
        }
    }
}

/// Wakes blocked and async waiters when dropped, including during an unwind.
struct Release<'a> {
    condvar: &'a Condvar,
    wakers: Vec<Waker>,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.condvar.notify_all();
        for waker in self.wakers.drain(..) {
            waker.wake();
        }
    }
}

fn run_listener<T, E>(listener: Listener<T, E>, outcome: &Result<T, E>) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| listener(outcome))) {
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string panic payload>");
        tracing::error!(target: "restendpoint_will", panic = message, "will listener panicked");
    }
}
