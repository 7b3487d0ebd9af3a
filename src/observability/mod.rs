//! Observability helpers for the WeCom client.
//!
//! Structured logging goes through `tracing`; this module keeps secrets out of it.

pub mod logging;

pub use logging::*;
