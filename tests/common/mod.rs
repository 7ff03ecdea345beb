//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use lambda_host::config::HostConfig;
use lambda_host::delegate::Delegate;
use lambda_host::http::HttpServer;
use lambda_host::lifecycle::Shutdown;

/// Spawn a host for the given delegate on an ephemeral port.
///
/// The listener is bound before the server task is spawned, so requests can
/// be sent as soon as this returns. Trigger the returned [`Shutdown`] to
/// stop the host.
pub async fn start_host(delegate: Arc<dyn Delegate>) -> (SocketAddr, Shutdown) {
    start_host_with_config(HostConfig::default(), delegate).await
}

/// Spawn a host with a custom config on an ephemeral port.
#[allow(dead_code)]
pub async fn start_host_with_config(
    config: HostConfig,
    delegate: Arc<dyn Delegate>,
) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, delegate);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A client that never goes through a local proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
