//! Error raised when a producer goes away without completing its result.

/// The [`Promise`](crate::Promise) backing a [`Will`](crate::Will) was
/// dropped while the result was still pending.
///
/// Error types used with a `Will` provide `From<Abandoned>` so that blocked
/// consumers are released with a failure instead of waiting forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("promise was dropped before the result was completed")]
pub struct Abandoned;
