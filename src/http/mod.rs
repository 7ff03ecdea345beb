//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, method gate, body buffering)
//!     → delegate (parse payload, invoke lambda)
//!     → response.rs (200 result / 500 error / 501)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
