//! Consumer side of an asynchronous result.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use crate::error::Abandoned;
use crate::promise::channel;
use crate::state::Shared;

/// A single-assignment asynchronous result.
///
/// A `Will` starts out pending and is completed exactly once by its
/// [`Promise`](crate::Promise), either with a value or with an error. The
/// terminal result can be consumed in three ways, all of which can be mixed
/// freely and used from any number of cloned handles:
///
/// - [`obtain`](Self::obtain) blocks the calling thread until completion;
/// - listeners ([`when_done`](Self::when_done), [`on_success`](Self::on_success),
///   [`on_failure`](Self::on_failure)) are called with the result. A listener
///   attached after completion runs immediately on the attaching thread;
/// - `.await` suspends the current task without blocking its thread.
///
/// Values and errors are cloned out to each consumer, so both `T` and `E`
/// need to be `Clone` for `obtain` and `.await`.
///
/// # Example
///
/// ```
/// use restendpoint_will::Will;
///
/// let will: Will<&str, ()> = Will::resolved("done");
/// will.on_success(|value| println!("finished: {value}"));
/// assert_eq!(will.obtain(), Ok("done"));
/// ```
pub struct Will<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Will<T, E> {
    pub(crate) fn from_shared(shared: Arc<Shared<T, E>>) -> Self {
        Self { shared }
    }

    /// Create a result that is already resolved with `value`.
    pub fn resolved(value: T) -> Self {
        Self::from_shared(Arc::new(Shared::done(Ok(value))))
    }

    /// Create a result that has already failed with `error`.
    pub fn failed(error: E) -> Self {
        Self::from_shared(Arc::new(Shared::done(Err(error))))
    }

    /// Check whether the result has reached a terminal state.
    pub fn is_done(&self) -> bool {
        self.shared.is_done()
    }

    /// Register a listener called once with the terminal result.
    ///
    /// If the result is still pending, the listener runs on the thread that
    /// completes it, before [`obtain`](Self::obtain) or `.await` return on
    /// any handle. Otherwise it runs immediately, before this method returns.
    ///
    /// A listener that panics is logged at error level and does not affect
    /// other listeners or waiters.
    pub fn when_done<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&Result<T, E>) + Send + 'static,
    {
        self.shared.subscribe(Box::new(listener));
        self
    }

    /// Register a listener called only if the result resolves successfully.
    pub fn on_success<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.when_done(move |result| {
            if let Ok(value) = result {
                listener(value);
            }
        })
    }

    /// Register a listener called only if the result fails.
    pub fn on_failure<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        self.when_done(move |result| {
            if let Err(error) = result {
                listener(error);
            }
        })
    }

    /// Derive a new result by transforming the value of this one.
    ///
    /// Failures are propagated unchanged.
    pub fn map<U, F>(&self, f: F) -> Will<U, E>
    where
        F: FnOnce(&T) -> U + Send + 'static,
        U: Send + Sync + 'static,
        E: Clone + From<Abandoned> + Send + Sync + 'static,
    {
        let (promise, mapped) = channel();
        self.when_done(move |result| {
            promise.complete(match result {
                Ok(value) => Ok(f(value)),
                Err(error) => Err(error.clone()),
            });
        });
        mapped
    }
}

impl<T, E> Will<T, E>
where
    T: Clone,
    E: Clone,
{
    /// Block the current thread until the result is complete.
    ///
    /// # Warning
    ///
    /// Do not call this from a thread that is itself responsible for
    /// completing the result (for instance a single-threaded async runtime
    /// driving the request), as it will never wake up. Use `.await` there.
    pub fn obtain(&self) -> Result<T, E> {
        (*self.shared.wait()).clone()
    }

    /// Block until the result is complete or `timeout` elapses.
    ///
    /// Returns `None` if the result is still pending after the timeout. A
    /// timeout too large to represent as a deadline waits indefinitely.
    pub fn obtain_timeout(&self, timeout: Duration) -> Option<Result<T, E>> {
        self.shared
            .wait_for(timeout)
            .map(|outcome| (*outcome).clone())
    }

    /// Get the terminal result without blocking, if there is one.
    pub fn peek(&self) -> Option<Result<T, E>> {
        self.shared.peek().map(|outcome| (*outcome).clone())
    }

    /// Get a future resolving to the terminal result.
    pub fn wait(&self) -> WillFuture<T, E> {
        WillFuture {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> Clone for Will<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for Will<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Will")
            .field("done", &self.shared.is_done())
            .field("listeners", &self.shared.listener_count())
            .finish()
    }
}

impl<T, E> IntoFuture for Will<T, E>
where
    T: Clone,
    E: Clone,
{
    type Output = Result<T, E>;
    type IntoFuture = WillFuture<T, E>;

    fn into_future(self) -> Self::IntoFuture {
        WillFuture {
            shared: self.shared,
        }
    }
}

/// Future returned by [`Will::wait`] and by awaiting a [`Will`].
pub struct WillFuture<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Future for WillFuture<T, E>
where
    T: Clone,
    E: Clone,
{
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.shared
            .poll(cx)
            .map(|outcome| (*outcome).clone())
    }
}

impl<T, E> fmt::Debug for WillFuture<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WillFuture")
            .field("done", &self.shared.is_done())
            .finish()
    }
}
