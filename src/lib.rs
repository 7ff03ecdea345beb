//! JSON Lambda Host Library

pub mod config;
pub mod delegate;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::HostConfig;
pub use delegate::{Delegate, Echo};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
