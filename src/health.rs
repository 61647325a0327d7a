// Health endpoint and keep-alive self-ping for free-tier hosting.
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::sleep;
use tracing::{info, warn};

const HEALTH_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK";

/// Answers every HTTP request with 200 OK. Enough for uptime probes;
/// anything fancier belongs behind a real server.
pub fn spawn_health_server(port: u16) {
    tokio::spawn(async move {
        let listener = match TcpListener::bind(("0.0.0.0", port)).await {
            Ok(l) => l,
            Err(e) => {
                warn!("Health server bind failed on port {}: {}", port, e);
                return;
            }
        };
        info!("🩺 Health endpoint listening on port {}", port);
        loop {
            match listener.accept().await {
                Ok((mut stream, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = stream.read(&mut buf).await;
                        let _ = stream.write_all(HEALTH_RESPONSE).await;
                        let _ = stream.shutdown().await;
                    });
                }
                Err(e) => {
                    warn!("Health accept error: {}", e);
                    sleep(Duration::from_secs(1)).await;
                }
            }
        }
    });
}

/// Pings our own public URL so the host does not put the service to sleep.
pub fn spawn_keepalive(url: String, interval_seconds: u64) {
    tokio::spawn(async move {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                warn!("Keep-alive client build failed: {}", e);
                return;
            }
        };
        info!("🔁 Keep-alive pinging {} every {}s", url, interval_seconds);
        loop {
            match client.get(&url).send().await {
                Ok(resp) => info!("Keep-alive ping: {}", resp.status()),
                Err(e) => warn!("Keep-alive ping failed: {}", e),
            }
            sleep(Duration::from_secs(interval_seconds)).await;
        }
    });
}
