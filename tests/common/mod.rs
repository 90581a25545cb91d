//! Shared utilities for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use quote_relay::config::RelayConfig;
use quote_relay::quotation::Quotation;
use quote_relay::resilience::Deadline;
use quote_relay::store::{PersistError, QuoteSink};
use quote_relay::upstream::UpstreamClient;
use quote_relay::{HttpServer, Relay, Shutdown};

/// Upstream payload for USD/BRL with the given bid.
pub fn usd_brl_payload(bid: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","bid":"{}","ask":"5.4335","timestamp":"1700000000","create_date":"2023-11-14 19:13:20"}}}}"#,
        bid
    )
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` produces the status code and JSON body for each request.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
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
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start a mock upstream answering every request with `bid` after `delay`.
pub async fn start_upstream(bid: &'static str, delay: Duration) -> SocketAddr {
    start_programmable_upstream(move || async move {
        tokio::time::sleep(delay).await;
        (200, usd_brl_payload(bid))
    })
    .await
}

/// In-memory sink that records inserted quotations after an optional delay.
#[derive(Default)]
pub struct MemorySink {
    pub delay: Duration,
    rows: Mutex<Vec<Quotation>>,
}

impl MemorySink {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn rows(&self) -> Vec<Quotation> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteSink for MemorySink {
    async fn insert(&self, quotation: &Quotation, _deadline: Deadline) -> Result<(), PersistError> {
        tokio::time::sleep(self.delay).await;
        self.rows.lock().unwrap().push(quotation.clone());
        Ok(())
    }
}

/// A running relay bound to an ephemeral port.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestRelay {
    pub fn url(&self) -> String {
        format!("http://{}/cotacao", self.addr)
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config pointing at `upstream` with the given deadlines.
pub fn config(upstream: SocketAddr, response_ms: u64, persist_ms: u64) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.url = format!("http://{}/json/last/USD-BRL", upstream);
    config.deadlines.response_ms = response_ms;
    config.deadlines.persist_ms = persist_ms;
    config
}

/// Start the relay with the real upstream client and the given sink.
pub async fn start_relay(config: RelayConfig, sink: Arc<dyn QuoteSink>) -> TestRelay {
    let source = Arc::new(UpstreamClient::with_client(client(), &config.upstream).unwrap());
    let relay = Relay::new(source, sink, &config.deadlines);

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let server = HttpServer::new(config, relay);

    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    TestRelay { addr, shutdown }
}

/// HTTP client that never reuses connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
