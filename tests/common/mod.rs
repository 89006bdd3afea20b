//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use reachmon::alert::WebhookSink;
use reachmon::probe::{ProbeError, ProbeOutcome, Prober};

/// Start a listener that accepts and immediately drops every connection.
pub async fn start_tcp_target() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    (addr, handle)
}

/// Start a minimal webhook endpoint. Every request body is forwarded to the
/// returned channel and answered with `200 OK`.
pub async fn start_webhook_receiver() -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(body) = read_http_body(&mut socket).await {
                    let _ = tx.send(body);
                }
                let response = "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}/services/test", addr), rx)
}

async fn read_http_body(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];

    loop {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data).to_string();
        if let Some(split) = text.find("\r\n\r\n") {
            let headers = &text[..split];
            let length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            let body = &data[split + 4..];
            if body.len() >= length {
                return Some(String::from_utf8_lossy(&body[..length]).to_string());
            }
        }
    }
}

/// Webhook sink that ignores proxy environment variables.
pub fn local_webhook(url: &str) -> WebhookSink {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    WebhookSink::with_client(client, url)
}

/// Prober replaying a fixed script of outcomes, then succeeding forever.
pub struct ScriptedProber {
    outcomes: Mutex<VecDeque<ProbeOutcome>>,
}

impl ScriptedProber {
    pub fn new(outcomes: impl IntoIterator<Item = ProbeOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self) -> Result<ProbeOutcome, ProbeError> {
        Ok(self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ProbeOutcome::Success))
    }
}
