//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use city_gateway::config::GatewayConfig;
use city_gateway::http::server::{build_router, AppState};
use city_gateway::upstream::client::{
    TransportError, UpstreamClient, UpstreamRequest, UpstreamResponse,
};

/// Scripted outcome of one mock fetch.
#[derive(Clone)]
pub enum MockOutcome {
    Respond {
        status: u16,
        content_type: Option<String>,
        body: Bytes,
    },
    Fail(String),
}

/// Counting, recording `UpstreamClient` double. Every `send` is
/// recorded so tests can assert on call counts and resolved URLs.
pub struct MockUpstream {
    outcome: MockOutcome,
    calls: AtomicU32,
    requests: Mutex<Vec<UpstreamRequest>>,
}

impl MockUpstream {
    pub fn responding(status: u16, content_type: Option<&str>, body: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            outcome: MockOutcome::Respond {
                status,
                content_type: content_type.map(ToString::to_string),
                body: Bytes::copy_from_slice(body),
            },
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: MockOutcome::Fail(message.to_string()),
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<UpstreamRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstream {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        match &self.outcome {
            MockOutcome::Respond {
                status,
                content_type,
                body,
            } => Ok(UpstreamResponse {
                status: StatusCode::from_u16(*status).unwrap(),
                content_type: content_type.clone(),
                body: body.clone(),
            }),
            MockOutcome::Fail(message) => Err(TransportError(message.clone())),
        }
    }
}

/// Build the production router over a mock upstream.
pub fn test_router(config: GatewayConfig, upstream: Arc<MockUpstream>) -> Router {
    build_router(AppState::new(config, upstream))
}

/// Collect a response body into bytes.
pub async fn read_body(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Start a raw TCP mock upstream that answers every connection with a
/// fixed HTTP response.
pub async fn start_mock_upstream(addr: SocketAddr, status_line: &'static str, headers: &'static str, body: &'static [u8]) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
                            status_line,
                            body.len(),
                            headers
                        )
                        .into_bytes();
                        response.extend_from_slice(body);
                        let _ = socket.write_all(&response).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}
