//! Single-assignment asynchronous results.
//!
//! A [`Will`] represents the outcome of an operation that is still running,
//! typically an HTTP exchange. It is completed exactly once through its
//! [`Promise`] and then stays in that terminal state.
//!
//! # Consuming a result
//!
//! - **Blocking**: [`Will::obtain`] parks the calling thread until the result
//!   is available.
//! - **Listeners**: [`Will::when_done`], [`Will::on_success`] and
//!   [`Will::on_failure`] attach callbacks. Late listeners are never missed:
//!   attaching to a completed result runs the callback immediately.
//! - **Async**: a `Will` implements [`IntoFuture`](std::future::IntoFuture),
//!   so it can simply be awaited.
//!
//! ```
//! use restendpoint_will::{Abandoned, channel};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Error {
//!     Gone,
//! }
//!
//! impl From<Abandoned> for Error {
//!     fn from(_: Abandoned) -> Self {
//!         Error::Gone
//!     }
//! }
//!
//! let (promise, will) = channel::<String, Error>();
//! will.on_success(|body| println!("received {body}"));
//!
//! std::thread::spawn(move || {
//!     promise.resolve("Hello world!".to_string());
//! });
//!
//! assert_eq!(will.obtain().unwrap(), "Hello world!");
//! ```
//!
//! # Completion rules
//!
//! - The first completion wins; later ones return `false` and change nothing.
//! - Dropping an uncompleted [`Promise`] fails the result with
//!   `E::from(Abandoned)`.
//! - Dropping every `Will` handle is allowed at any time; completing the
//!   result afterwards is a no-op from the consumer's point of view.

mod error;
mod promise;
mod state;
mod will;

pub use error::Abandoned;
pub use promise::{Promise, channel};
pub use will::{Will, WillFuture};
