//! Structured and freeform summarization over one chat request core

use super::client::{
    complete, ChatMessage, ChatRequest, ChatResponse, ChatTransport, FunctionCallMode,
    FunctionDefinition,
};
use crate::config::{prompts, ProcessorConfig};
use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Name of the function the model calls with its structured summary
pub const EXTRACT_FUNCTION_NAME: &str = "extract_content_summary";

/// Kind marker on freeform results
pub const SUMMARY_KIND: &str = "summary";

/// Title given to freeform results
pub const AGGREGATE_TITLE: &str = "Combined summary of saved items";

/// Sole tag given to freeform results
pub const AGGREGATE_TAG: &str = "summary";

/// Title, description and tags derived for one piece of content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    /// Content kind (`text`, `image`, `video`) or `summary` for reports
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// How the model is asked to answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Function call carrying title/description/tags
    Structured,
    /// Plain assistant text
    Freeform,
}

#[derive(Deserialize)]
struct ExtractArguments {
    title: String,
    description: String,
    tags: Vec<String>,
}

/// LLM-backed summarizer
pub struct SummaryExtractor {
    transport: Arc<dyn ChatTransport>,
    language: String,
}

impl SummaryExtractor {
    pub fn new(transport: Arc<dyn ChatTransport>, language: impl Into<String>) -> Self {
        Self {
            transport,
            language: language.into(),
        }
    }

    pub fn transport(&self) -> &dyn ChatTransport {
        self.transport.as_ref()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Build the chat request for `content` fetched from `url`
    pub fn build_request(
        &self,
        content: &str,
        url: &str,
        processor: &ProcessorConfig,
        mode: ResponseMode,
    ) -> ChatRequest {
        let function_call = match mode {
            ResponseMode::Structured => FunctionCallMode::Auto,
            ResponseMode::Freeform => FunctionCallMode::None,
        };

        ChatRequest {
            model: processor.model.clone(),
            messages: vec![
                ChatMessage::system(prompts::render(&processor.prompt, &self.language)),
                ChatMessage::user(format!("URL: {}\n\nContent: {}", url, content)),
            ],
            functions: vec![extraction_function(&self.language)],
            function_call: Some(function_call),
            max_tokens: processor.max_tokens,
            temperature: processor.temperature,
        }
    }

    /// Structured mode: the model must call `extract_content_summary`
    pub async fn extract(
        &self,
        content: &str,
        url: &str,
        processor: &ProcessorConfig,
    ) -> Result<ContentSummary> {
        let request = self.build_request(content, url, processor, ResponseMode::Structured);
        tracing::debug!(url = %url, model = %request.model, "Sending content summary request");
        let response = complete(self.transport.as_ref(), processor, &request).await?;
        parse_structured(response)
    }

    /// Freeform mode: the assistant text becomes the description
    pub async fn summarize(
        &self,
        content: &str,
        url: &str,
        processor: &ProcessorConfig,
    ) -> Result<ContentSummary> {
        let request = self.build_request(content, url, processor, ResponseMode::Freeform);
        tracing::debug!(url = %url, model = %request.model, "Sending freeform summary request");
        let response = complete(self.transport.as_ref(), processor, &request).await?;
        parse_freeform(response)
    }
}

/// Schema of the single function offered in structured mode
pub fn extraction_function(language: &str) -> FunctionDefinition {
    FunctionDefinition {
        name: EXTRACT_FUNCTION_NAME.to_string(),
        description: format!(
            "Extract a summary of the web content and return the result in {}",
            language
        ),
        parameters: json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": format!("Title of the content (in {})", language),
                },
                "description": {
                    "type": "string",
                    "description": format!("Concise summary of the content (in {})", language),
                },
                "tags": {
                    "type": "array",
                    "description": format!("Tags relevant to the content (in {})", language),
                    "items": { "type": "string" },
                },
            },
            "required": ["title", "description", "tags"],
        }),
    }
}

/// Pull the structured summary out of a function-call response
pub fn parse_structured(response: ChatResponse) -> Result<ContentSummary> {
    let choice = response.into_first_choice()?;

    let call = match choice.message.function_call {
        Some(call) if call.name == EXTRACT_FUNCTION_NAME => call,
        Some(call) => return Err(ProtocolError::UnexpectedFunction(Some(call.name)).into()),
        None => return Err(ProtocolError::UnexpectedFunction(None).into()),
    };

    let args: ExtractArguments = serde_json::from_str(&call.arguments)
        .map_err(|e| ProtocolError::Arguments(e.to_string()))?;

    Ok(ContentSummary {
        kind: String::new(),
        title: args.title,
        description: args.description,
        tags: args.tags,
    })
}

/// Wrap the first choice's text as a report summary
pub fn parse_freeform(response: ChatResponse) -> Result<ContentSummary> {
    let choice = response.into_first_choice()?;
    Ok(ContentSummary {
        kind: SUMMARY_KIND.to_string(),
        title: AGGREGATE_TITLE.to_string(),
        description: choice.message.content.unwrap_or_default(),
        tags: vec![AGGREGATE_TAG.to_string()],
    })
}
