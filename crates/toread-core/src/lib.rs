//! toread core library
//!
//! Save URLs to a personal reading list and let an LLM do the triage.
//!
//! # Features
//! - URL classification into text, image and video content
//! - Page fetching through a reader proxy with direct fallback
//! - Structured summaries (title, description, tags) via function calling
//! - Two-stage image description for vision-capable models
//! - SQLite storage with tag search and combined reports

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod llm;
pub mod processor;
pub mod service;
pub mod summary;

pub use config::{Config, FetchConfig, LlmConfig, ProcessorConfig, SummaryConfig};
pub use content::{classify, ContentFetcher, ContentKind, FetchedContent};
pub use db::{Collection, CollectionFilter, Database, Tag, TagLookup};
pub use error::{Error, ErrorCategory, ProtocolError, Result, ToReadError};
pub use llm::{ChatTransport, ContentSummary, HttpChatTransport, ImageDescriber, SummaryExtractor};
pub use processor::ContentProcessor;
pub use service::{CollectionListItem, CollectionService};
pub use summary::{rank_tags, AggregateSummaryBuilder, NOTHING_FOUND_MESSAGE};

/// Scheme of the pseudo-URL sent with aggregate report requests
pub const VIRTUAL_URL_SCHEME: &str = "collection-summary://";

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "toread";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "toread";

/// Longest prefix of `s` that fits in `max_bytes` and ends on a char boundary
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_char_boundary("hello", 10), "hello");
        assert_eq!(truncate_to_char_boundary("hello", 3), "hel");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is two bytes
        assert_eq!(truncate_to_char_boundary("aé", 2), "a");
        assert_eq!(truncate_to_char_boundary("日本語", 4), "日");
    }
}
