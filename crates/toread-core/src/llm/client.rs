//! Chat-completions wire types and HTTP transport for OpenAI-compatible services

use crate::config::ProcessorConfig;
use crate::error::{ProtocolError, Result, ToReadError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sends one serialized chat request and returns the raw reply
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, endpoint: &str, api_key: &str, request: &ChatRequest)
        -> Result<ChatReply>;
}

/// Raw HTTP reply from a chat endpoint
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub status: u16,
    pub body: String,
}

impl ChatReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Chat message for completion requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

/// Plain text, or typed parts for multimodal input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }
    }
}

/// Callable function offered to the model
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Whether the model may call the offered functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionCallMode {
    Auto,
    None,
}

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCallMode>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Parsed chat-completions response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

impl ChatResponse {
    /// Check the status and decode the body
    pub fn from_reply(reply: ChatReply) -> Result<Self> {
        if !reply.is_success() {
            return Err(ProtocolError::BadStatus {
                status: reply.status,
                body: reply.body,
            }
            .into());
        }
        serde_json::from_str(&reply.body)
            .map_err(|e| ProtocolError::MalformedBody(e.to_string()).into())
    }

    /// First choice, or the empty-choices failure
    pub fn into_first_choice(self) -> Result<ChatChoice> {
        self.choices
            .into_iter()
            .next()
            .ok_or_else(|| ProtocolError::EmptyChoices.into())
    }
}

/// Send a request to the processor's endpoint and decode the reply
pub async fn complete(
    transport: &dyn ChatTransport,
    processor: &ProcessorConfig,
    request: &ChatRequest,
) -> Result<ChatResponse> {
    let reply = transport
        .send(&processor.api_endpoint, &processor.api_key, request)
        .await?;
    tracing::debug!(status = reply.status, body = %reply.body, "LLM response body");
    ChatResponse::from_reply(reply)
}

/// reqwest-backed transport with bearer auth
pub struct HttpChatTransport {
    http_client: reqwest::Client,
}

impl HttpChatTransport {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ToReadError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http_client })
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(
        &self,
        endpoint: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatReply> {
        let response = self
            .http_client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| ProtocolError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProtocolError::Transport(format!("failed to read response body: {}", e)))?;

        Ok(ChatReply { status, body })
    }
}
