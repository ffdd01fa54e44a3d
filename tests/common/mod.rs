//! Shared utilities for monitor integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::AtomicU32;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use maintenance_monitor::config::MonitorConfig;
use maintenance_monitor::monitor::recovery::RecoveryAction;

/// Start a programmable health endpoint on an ephemeral port.
///
/// The handler receives the raw request head and returns (status, body).
/// Responses are served with a JSON content type and `Connection: close`.
pub async fn start_health_backend<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]).to_string();

                        let (status, body) = handler(head).await;
                        let reason = match status {
                            200 => "OK",
                            503 => "Service Unavailable",
                            _ => "Error",
                        };
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason,
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

/// Monitor configuration pointed at a test backend, with a short timeout.
pub fn test_config(addr: SocketAddr, interval_secs: u64) -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.backend.base_url = format!("http://{}", addr);
    config.poll.interval_secs = interval_secs;
    config.poll.timeout_secs = 2;
    config
}

/// Recovery action that counts invocations.
pub struct CountingRecovery {
    count: Arc<AtomicU32>,
}

impl RecoveryAction for CountingRecovery {
    fn recover(&self) {
        self.count.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

pub fn counting_recovery() -> (Arc<dyn RecoveryAction>, Arc<AtomicU32>) {
    let count = Arc::new(AtomicU32::new(0));
    let action = Arc::new(CountingRecovery {
        count: count.clone(),
    });
    (action, count)
}
