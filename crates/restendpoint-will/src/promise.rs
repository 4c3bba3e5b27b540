//! Producer side of a [`Will`].

use std::fmt;
use std::sync::Arc;

use crate::error::Abandoned;
use crate::state::Shared;
use crate::will::Will;

/// Create a connected producer/consumer pair.
///
/// The [`Promise`] is handed to whatever performs the work; the [`Will`] is
/// returned to the caller.
///
/// # Example
///
/// ```
/// use restendpoint_will::{Abandoned, channel};
///
/// #[derive(Debug, Clone)]
/// struct Failure;
///
/// impl From<Abandoned> for Failure {
///     fn from(_: Abandoned) -> Self {
///         Failure
///     }
/// }
///
/// let (promise, will) = channel::<u32, Failure>();
/// std::thread::spawn(move || {
///     promise.resolve(42);
/// });
/// assert_eq!(will.obtain().unwrap(), 42);
/// ```
pub fn channel<T, E>() -> (Promise<T, E>, Will<T, E>)
where
    E: From<Abandoned>,
{
    let shared = Arc::new(Shared::pending());
    (
        Promise {
            shared: Arc::clone(&shared),
        },
        Will::from_shared(shared),
    )
}

/// The completing half of a [`Will`].
///
/// Exactly one completion wins. Every later call to [`resolve`](Self::resolve),
/// [`fail`](Self::fail) or [`complete`](Self::complete) is a no-op that
/// returns `false`. Completing after every `Will` handle has been dropped is
/// also fine: the result is stored and nobody observes it.
///
/// Dropping a `Promise` that never completed fails the result with
/// `E::from(Abandoned)`.
pub struct Promise<T, E>
where
    E: From<Abandoned>,
{
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Promise<T, E>
where
    E: From<Abandoned>,
{
    /// Complete the result successfully.
    pub fn resolve(&self, value: T) -> bool {
        self.complete(Ok(value))
    }

    /// Complete the result with a failure.
    pub fn fail(&self, error: E) -> bool {
        self.complete(Err(error))
    }

    /// Complete the result with either outcome.
    ///
    /// Returns `true` if this call moved the result out of the pending state.
    pub fn complete(&self, result: Result<T, E>) -> bool {
        let completed = self.shared.complete(result);
        if !completed {
            tracing::debug!(target: "restendpoint_will", "ignoring completion of an already completed will");
        }
        completed
    }

    /// Check whether the result has already been completed.
    pub fn is_done(&self) -> bool {
        self.shared.is_done()
    }
}

impl<T, E> Drop for Promise<T, E>
where
    E: From<Abandoned>,
{
    fn drop(&mut self) {
        if !self.shared.is_done() && self.shared.complete(Err(E::from(Abandoned))) {
            tracing::warn!(target: "restendpoint_will", "promise dropped before completion");
        }
    }
}

impl<T, E> fmt::Debug for Promise<T, E>
where
    E: From<Abandoned>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("done", &self.shared.is_done())
            .finish()
    }
}
