//! Observability subsystem.
//!
//! Structured logging only; the host exposes no metrics endpoint.

pub mod logging;
