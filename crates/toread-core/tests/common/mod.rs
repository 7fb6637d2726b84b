//! Shared fixtures: canned chat transport and a tiny local HTTP server

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use toread_core::llm::{ChatReply, ChatRequest, ChatTransport, EXTRACT_FUNCTION_NAME};
use toread_core::{Config, ContentFetcher, ContentProcessor, Result};

/// Replays queued replies and records every request it was given
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<ChatReply>>,
    requests: Mutex<Vec<(String, ChatRequest)>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, reply: ChatReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn push_function_call(&self, title: &str, description: &str, tags: &[&str]) {
        let arguments = json!({"title": title, "description": description, "tags": tags});
        self.push(function_call_reply(EXTRACT_FUNCTION_NAME, &arguments.to_string()));
    }

    pub fn push_text(&self, content: &str) {
        let body = json!({
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        });
        self.push(ChatReply::new(200, body.to_string()));
    }

    pub fn requests(&self) -> Vec<(String, ChatRequest)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn function_call_reply(name: &str, arguments: &str) -> ChatReply {
    let body = json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "function_call": {"name": name, "arguments": arguments}
            },
            "finish_reason": "function_call"
        }]
    });
    ChatReply::new(200, body.to_string())
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(&self, endpoint: &str, _api_key: &str, request: &ChatRequest) -> Result<ChatReply> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_string(), request.clone()));
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ChatReply::new(500, "no canned reply")))
    }
}

/// Canned HTTP response
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    /// Held back this long before the response is written
    pub delay: Option<Duration>,
}

impl Canned {
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8"),
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn bytes(content_type: Option<&'static str>, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.to_vec(),
            delay: None,
        }
    }
}

/// Serves fixed responses by exact request path; anything else is a 404
pub struct TestServer {
    pub addr: SocketAddr,
    hits: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn start(routes: Vec<(String, Canned)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<HashMap<String, Canned>> = Arc::new(routes.into_iter().collect());
        let hits = Arc::new(Mutex::new(Vec::new()));

        let task_hits = Arc::clone(&hits);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&task_hits);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        let n = match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => n,
                        };
                        buf.extend_from_slice(&chunk[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }

                    let request = String::from_utf8_lossy(&buf);
                    let path = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();
                    hits.lock().unwrap().push(path.clone());

                    let canned = routes
                        .get(&path)
                        .cloned()
                        .unwrap_or_else(|| Canned::text(404, "not found"));
                    if let Some(delay) = canned.delay {
                        tokio::time::sleep(delay).await;
                    }

                    let mut head = format!(
                        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                        canned.status,
                        reason(canned.status),
                        canned.body.len()
                    );
                    if let Some(ct) = canned.content_type {
                        head.push_str(&format!("Content-Type: {}\r\n", ct));
                    }
                    head.push_str("\r\n");

                    let _ = socket.write_all(head.as_bytes()).await;
                    let _ = socket.write_all(&canned.body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, hits }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Reader proxy base served by this server
    pub fn proxy_base(&self) -> String {
        self.url("/proxy/")
    }

    /// Request path the proxy sees for `target`
    pub fn proxy_path(target: &str) -> String {
        format!("/proxy/{}", target)
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Status",
    }
}

/// Config pointing the reader proxy at `proxy_base`
pub fn test_config(proxy_base: &str) -> Config {
    let mut config = Config::default();
    config.language = "English".to_string();
    config.fetch.reader_proxy = proxy_base.to_string();
    config.fetch.timeout_secs = 5;
    config.llm.text.api_endpoint = "http://llm.test/v1/chat/completions".to_string();
    config.llm.text.model = "text-model".to_string();
    config.llm.image.api_endpoint = "http://vision.test/v1/chat/completions".to_string();
    config.llm.image.model = "vision-model".to_string();
    config
}

pub fn processor(config: Config, transport: Arc<MockTransport>) -> ContentProcessor {
    let config = Arc::new(config);
    let fetcher = ContentFetcher::new(&config.fetch).unwrap();
    ContentProcessor::with_parts(config, fetcher, transport)
}
