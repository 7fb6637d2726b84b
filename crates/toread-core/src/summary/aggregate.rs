//! Combined report over many saved collections

use super::ranker::{rank_tags, TOP_TAG_LIMIT};
use crate::config::{Config, ProcessorConfig};
use crate::db::{Collection, TagLookup};
use crate::error::Result;
use crate::llm::SummaryExtractor;
use std::fmt::Write as _;
use std::sync::Arc;

/// Returned when a search matched nothing
pub const NOTHING_FOUND_MESSAGE: &str = "No saved content matched the given criteria.";

/// Entries spelled out in the prompt; the rest are only counted
pub const MAX_PROMPT_ENTRIES: usize = 10;

/// Pseudo-URL identifying an aggregate request over `count` items
pub fn virtual_url(count: usize) -> String {
    format!("{}{}-articles", crate::VIRTUAL_URL_SCHEME, count)
}

/// Processor for aggregate reports: text processor's endpoint, own prompt and sampling
pub fn summary_processor(config: &Config) -> ProcessorConfig {
    let text = &config.llm.text;
    ProcessorConfig {
        enabled: Some(true),
        api_endpoint: text.api_endpoint.clone(),
        api_key: text.api_key.clone(),
        model: text.model.clone(),
        prompt: config.summary.prompt.clone(),
        max_tokens: config.summary.max_tokens,
        temperature: config.summary.temperature,
    }
}

pub struct AggregateSummaryBuilder {
    extractor: Arc<SummaryExtractor>,
    processor: ProcessorConfig,
}

impl AggregateSummaryBuilder {
    pub fn new(extractor: Arc<SummaryExtractor>, config: &Config) -> Self {
        Self {
            extractor,
            processor: summary_processor(config),
        }
    }

    /// Zero items: fixed message. One: its description. More: one freeform LLM call.
    pub async fn summarize(
        &self,
        lookup: &dyn TagLookup,
        collections: &[Collection],
    ) -> Result<String> {
        match collections {
            [] => return Ok(NOTHING_FOUND_MESSAGE.to_string()),
            [only] => return Ok(only.description.clone()),
            _ => {}
        }

        let prompt = build_prompt(lookup, collections);
        let url = virtual_url(collections.len());
        tracing::info!(count = collections.len(), "Generating aggregate summary");

        let summary = self
            .extractor
            .summarize(&prompt, &url, &self.processor)
            .await?;
        Ok(summary.description)
    }
}

fn build_prompt(lookup: &dyn TagLookup, collections: &[Collection]) -> String {
    let total = collections.len();
    let top_tags = rank_tags(lookup, collections, TOP_TAG_LIMIT);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "## Saved content analysis\n");
    let _ = writeln!(
        out,
        "Analyse the following {} saved items and write one combined report. \
         Give the report directly without describing your reasoning.\n",
        total
    );

    if !top_tags.is_empty() {
        let _ = writeln!(out, "Main tags: {}\n", top_tags.join(", "));
    }

    let _ = writeln!(out, "## Saved items\n");

    for (i, collection) in collections.iter().take(MAX_PROMPT_ENTRIES).enumerate() {
        let _ = writeln!(out, "### Item {}", i + 1);
        let _ = writeln!(out, "Title: {}", collection.title);
        let _ = writeln!(out, "Type: {}", collection.kind);

        match lookup.tags_for(collection.id) {
            Ok(tags) if !tags.is_empty() => {
                let _ = writeln!(out, "Tags: {}", tags.join(", "));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    collection_id = collection.id,
                    "Leaving tags out of summary prompt: {}",
                    e
                );
            }
        }

        let _ = writeln!(out, "Summary: {}\n", collection.description);
    }

    if total > MAX_PROMPT_ENTRIES {
        let _ = writeln!(
            out,
            "... and {} more saved items",
            total - MAX_PROMPT_ENTRIES
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use crate::error::ToReadError;
    use std::collections::HashMap;

    struct MapLookup(HashMap<i64, Vec<String>>);

    impl TagLookup for MapLookup {
        fn tags_for(&self, collection_id: i64) -> Result<Vec<String>> {
            Ok(self.0.get(&collection_id).cloned().unwrap_or_default())
        }
    }

    fn collections(n: i64) -> Vec<Collection> {
        (1..=n)
            .map(|id| Collection {
                id,
                owner_id: 1,
                url: format!("https://example.com/{}", id),
                kind: ContentKind::Text,
                title: format!("Title {}", id),
                description: format!("Description {}", id),
                created_at: String::new(),
                updated_at: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_virtual_url() {
        assert_eq!(virtual_url(12), "collection-summary://12-articles");
    }

    #[test]
    fn test_prompt_truncates_after_ten() {
        let lookup = MapLookup(HashMap::new());
        let prompt = build_prompt(&lookup, &collections(12));

        assert!(prompt.contains("following 12 saved items"));
        assert!(prompt.contains("### Item 10\n"));
        assert!(!prompt.contains("### Item 11"));
        assert!(prompt.contains("... and 2 more saved items"));
        assert!(!prompt.contains("Main tags"));
    }

    #[test]
    fn test_prompt_lists_tags() {
        let mut map = HashMap::new();
        map.insert(1, vec!["rust".to_string(), "async".to_string()]);
        map.insert(2, vec!["rust".to_string()]);
        let prompt = build_prompt(&MapLookup(map), &collections(2));

        assert!(prompt.contains("Main tags: rust, async\n"));
        assert!(prompt.contains("Tags: rust, async\n"));
        assert!(prompt.contains("Type: text\n"));
        assert!(prompt.contains("Summary: Description 2\n"));
        assert!(!prompt.contains("more saved items"));
    }

    struct FailingLookup;

    impl TagLookup for FailingLookup {
        fn tags_for(&self, collection_id: i64) -> Result<Vec<String>> {
            if collection_id == 1 {
                Err(ToReadError::InvalidInput("tag table unavailable".into()))
            } else {
                Ok(vec!["kept".to_string()])
            }
        }
    }

    #[test]
    fn test_prompt_skips_tags_that_fail_to_load() {
        let prompt = build_prompt(&FailingLookup, &collections(2));

        assert!(prompt.contains("### Item 1
Title: Title 1
Type: text
Summary: Description 1
"));
        assert!(prompt.contains("### Item 2
Title: Title 2
Type: text
Tags: kept
"));
        assert!(prompt.contains("Main tags: kept
"));
    }

    #[test]
    fn test_summary_processor_borrows_text_endpoint() {
        let mut config = Config::default();
        config.llm.text.api_endpoint = "http://llm.local/v1/chat/completions".into();
        config.llm.text.model = "text-model".into();

        let processor = summary_processor(&config);
        assert_eq!(processor.api_endpoint, "http://llm.local/v1/chat/completions");
        assert_eq!(processor.model, "text-model");
        assert_eq!(processor.max_tokens, 1500);
        assert_eq!(processor.temperature, 1.0);
        assert_eq!(processor.prompt, config.summary.prompt);
    }
}
