//! Global async runtime.
//!
//! Endpoints run their exchanges on this runtime unless they were built with
//! an explicit [`tokio::runtime::Handle`]. Keeping the exchange off the
//! caller's thread lets synchronous code block on
//! [`Will::obtain`](restendpoint_will::Will::obtain) safely.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Handle, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Initialize the global runtime.
///
/// Called implicitly on first use. Calling it early moves the start-up
/// cost out of the first request.
pub fn init() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("restendpoint")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Get a reference to the global runtime, creating it if needed.
pub fn get() -> &'static Runtime {
    init()
}

/// A handle to the global runtime.
pub fn handle() -> Handle {
    get().handle().clone()
}

/// Block on a future using the global runtime.
///
/// # Panics
///
/// Panics when called from within an async context.
pub fn block_on<F: Future>(future: F) -> F::Output {
    get().block_on(future)
}

/// Spawn a future on the global runtime.
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    get().spawn(future)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_block_on() {
        let task = spawn(async { 40 + 2 });
        assert_eq!(block_on(task).unwrap(), 42);
    }

    #[test]
    fn test_init_is_idempotent() {
        assert!(std::ptr::eq(init(), get()));
    }
}
