//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use swagger_mirror::document::{DocumentSource, DocumentStore, Fetcher};

/// Start a programmable mock document server on an ephemeral port.
///
/// `f` returns the status code and body for each request.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request head; the mock ignores its contents.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock document server that always returns `body` with 200.
#[allow(dead_code)]
pub async fn start_mock_backend(body: &'static str) -> SocketAddr {
    start_programmable_backend(move || async move { (200, body.to_string()) }).await
}

/// Start a mock server that writes `response` verbatim to every connection, then closes it.
#[allow(dead_code)]
pub async fn start_raw_backend(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

#[allow(dead_code)]
pub fn fetcher(timeout: Duration, require_success_status: bool) -> Fetcher {
    Fetcher::new(timeout, require_success_status).unwrap()
}

/// Load a store backed by a local file.
#[allow(dead_code)]
pub async fn local_store(path: &Path) -> Arc<DocumentStore> {
    let source = DocumentSource::classify(path.to_str().unwrap(), Duration::from_secs(30));
    Arc::new(
        DocumentStore::load(source, fetcher(Duration::from_secs(5), false))
            .await
            .unwrap(),
    )
}

/// Poll `check` every 50ms until it holds or `timeout` elapses.
#[allow(dead_code)]
pub async fn wait_until<F: Fn() -> bool>(timeout: Duration, check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    check()
}
