//! Tracing targets.
//!
//! The crate logs through `tracing` and never installs a subscriber. Use
//! these targets in filter directives to select a subsystem, e.g.
//! `RUST_LOG=restendpoint::endpoint=debug`.

/// Target names for log filtering.
pub mod targets {
    /// Request orchestration.
    pub const ENDPOINT: &str = "restendpoint::endpoint";
    /// Serializer selection and codecs.
    pub const SERIALIZER: &str = "restendpoint::serializer";
    /// Network exchange.
    pub const TRANSPORT: &str = "restendpoint::transport";
    /// Status classification.
    pub const ERROR_HANDLER: &str = "restendpoint::error_handler";
}
