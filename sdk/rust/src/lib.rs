pub mod client;

pub use client::HostClient;
