//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use locale_gateway::config::GatewayConfig;
use locale_gateway::content::ContentIndex;
use locale_gateway::http::HttpServer;
use locale_gateway::lifecycle::Shutdown;

/// Start a mock rendering origin that echoes the request path.
///
/// Responds `200 OK` with body `origin:{path}` so pass-through tests can
/// assert which path reached the origin.
pub async fn start_mock_origin() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]).to_string();
                        let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                        let body = format!("origin:{path}");
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Absolute path of the checked-in content fixture.
pub fn fixture_index_path() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/content.json")
        .display()
        .to_string()
}

/// Default test config pointed at a mock origin and the fixture snapshot.
pub fn fixture_config(origin: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.origin = format!("http://{origin}");
    config.content.index_path = fixture_index_path();
    config
}

/// Spawn a gateway on an ephemeral port; returns its address and the
/// shutdown coordinator that stops it.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let content = Arc::new(
        ContentIndex::load(Path::new(&config.content.index_path)).expect("fixture should load"),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let handle = shutdown.handle();
    let server = HttpServer::new(config, content).expect("test config should be valid");

    tokio::spawn(async move {
        let _ = server.run(listener, handle).await;
    });

    (addr, shutdown)
}

/// HTTP client that does not follow redirects (we assert on them).
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
