//! Content fetching for saved URLs

use super::ContentKind;
use crate::config::FetchConfig;
use crate::error::{Result, ToReadError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Content type assumed when an image response carries none
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Longest response body quoted back in an image fetch error
const ERROR_BODY_LIMIT: usize = 512;

/// Payload ready for summarization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedContent {
    /// Page text, markdown when the reader proxy succeeded
    Text(String),
    /// `data:<content-type>;base64,<payload>`
    Image(String),
}

/// Fetches page text and images with one shared HTTP client
pub struct ContentFetcher {
    client: Client,
    reader_proxy: String,
    max_content_bytes: usize,
}

impl ContentFetcher {
    /// Create a fetcher whose client applies the configured timeout to every call
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("toread/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ToReadError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    /// Create a fetcher with a custom client
    pub fn with_client(client: Client, config: &FetchConfig) -> Self {
        Self {
            client,
            reader_proxy: config.reader_proxy.clone(),
            max_content_bytes: config.max_content_bytes,
        }
    }

    /// Fetch a URL using the strategy for its kind
    pub async fn fetch(&self, url: &str, kind: ContentKind) -> Result<FetchedContent> {
        match kind {
            ContentKind::Image => self.fetch_image(url).await.map(FetchedContent::Image),
            // Video pages get no dedicated extraction and are read like any page
            ContentKind::Text | ContentKind::Video => {
                let text = self.fetch_text(url).await?;
                Ok(FetchedContent::Text(self.cap(url, text)))
            }
        }
    }

    /// Reader proxy first, raw page on any non-success proxy status
    async fn fetch_text(&self, url: &str) -> Result<String> {
        if url.starts_with("http") {
            if let Some(text) = self.fetch_via_proxy(url).await? {
                return Ok(text);
            }
            tracing::warn!(url = %url, "Reader proxy conversion failed, falling back to direct fetch");
        }
        self.fetch_direct(url).await
    }

    async fn fetch_via_proxy(&self, url: &str) -> Result<Option<String>> {
        let proxy_url = format!("{}{}", self.reader_proxy, url);
        let response = self
            .client
            .get(&proxy_url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        if !response.status().is_success() {
            tracing::debug!(
                url = %url,
                status = response.status().as_u16(),
                "Reader proxy returned non-success status"
            );
            return Ok(None);
        }

        read_text(url, response).await.map(Some)
    }

    /// Plain GET of the original URL
    async fn fetch_direct(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(url, status));
        }

        read_text(url, response).await
    }

    /// Download an image with browser-like headers and encode it as a data URI
    async fn fetch_image(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .headers(browser_image_headers())
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::info!(url = %url, status = status.as_u16(), body = %body, "Fetching image content failed");
            let body = crate::truncate_to_char_boundary(&body, ERROR_BODY_LIMIT);
            return Err(ToReadError::Fetch(format!(
                "unexpected status code {} fetching {}: {}",
                status.as_u16(),
                url,
                body
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response.bytes().await.map_err(|e| {
            ToReadError::Fetch(format!("Failed to read image body from {}: {}", url, e))
        })?;

        tracing::debug!(url = %url, bytes = bytes.len(), "Fetched image");
        Ok(encode_data_uri(&bytes, content_type.as_deref()))
    }

    fn cap(&self, url: &str, text: String) -> String {
        if text.len() <= self.max_content_bytes {
            return text;
        }
        tracing::debug!(
            url = %url,
            original = text.len(),
            limit = self.max_content_bytes,
            "Truncating fetched content"
        );
        crate::truncate_to_char_boundary(&text, self.max_content_bytes).to_string()
    }
}

/// Encode raw bytes as `data:<content-type>;base64,<payload>`
pub fn encode_data_uri(bytes: &[u8], content_type: Option<&str>) -> String {
    let content_type = match content_type.map(str::trim) {
        Some(ct) if !ct.is_empty() => ct,
        _ => DEFAULT_IMAGE_CONTENT_TYPE,
    };
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

fn browser_image_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let pairs = [
        ("user-agent", BROWSER_USER_AGENT),
        (
            "accept",
            "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8",
        ),
        ("accept-language", "en-US,en;q=0.9"),
        ("accept-encoding", "gzip, deflate, br"),
        ("connection", "keep-alive"),
        ("cache-control", "no-cache"),
        ("pragma", "no-cache"),
        ("sec-fetch-site", "cross-site"),
        ("sec-fetch-mode", "no-cors"),
        ("sec-fetch-dest", "image"),
    ];
    for (name, value) in pairs {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers
}

async fn read_text(url: &str, response: Response) -> Result<String> {
    response.text().await.map_err(|e| {
        ToReadError::Fetch(format!("Failed to read response body from {}: {}", url, e))
    })
}

fn transport_error(url: &str, e: reqwest::Error) -> ToReadError {
    if e.is_timeout() {
        ToReadError::Fetch(format!(
            "Request timeout fetching {}: Server took too long to respond.",
            url
        ))
    } else if e.is_connect() {
        ToReadError::Fetch(format!(
            "Connection error fetching {}: Cannot reach server.",
            url
        ))
    } else {
        ToReadError::Fetch(format!("Failed to fetch URL {}: {}", url, e))
    }
}

fn status_error(url: &str, status: StatusCode) -> ToReadError {
    let msg = match status {
        StatusCode::NOT_FOUND => format!("URL not found (404): {}", url),
        StatusCode::FORBIDDEN => format!("Access forbidden (403): {}", url),
        StatusCode::UNAUTHORIZED => format!("Unauthorized (401): {}", url),
        StatusCode::TOO_MANY_REQUESTS => format!("Rate limit exceeded (429): {}", url),
        s if s.is_server_error() => format!("Server error ({}): {}", s.as_u16(), url),
        _ => format!(
            "HTTP error {} ({}): {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error"),
            url
        ),
    };
    ToReadError::Fetch(msg)
}
