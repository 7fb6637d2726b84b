//! LLM integration
//!
//! Provides:
//! - Chat-completions wire types and a pluggable transport
//! - Structured (function-call) and freeform summarization
//! - Two-stage image description

mod client;
mod extractor;
mod image;

pub use client::{
    complete, AssistantMessage, ChatChoice, ChatMessage, ChatReply, ChatRequest, ChatResponse,
    ChatTransport, ContentPart, FunctionCall, FunctionCallMode, FunctionDefinition,
    HttpChatTransport, ImageUrl, MessageContent,
};
pub use extractor::{
    extraction_function, parse_freeform, parse_structured, ContentSummary, ResponseMode,
    SummaryExtractor, AGGREGATE_TAG, AGGREGATE_TITLE, EXTRACT_FUNCTION_NAME, SUMMARY_KIND,
};
pub use image::ImageDescriber;
