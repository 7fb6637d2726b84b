//! URL to summary pipeline: classify, fetch, then ask the model

use crate::config::Config;
use crate::content::{classify, ContentFetcher, FetchedContent};
use crate::error::Result;
use crate::llm::{ChatTransport, ContentSummary, HttpChatTransport, ImageDescriber, SummaryExtractor};
use std::sync::Arc;

/// Turns one saved URL into a title, description and tags
pub struct ContentProcessor {
    config: Arc<Config>,
    fetcher: ContentFetcher,
    extractor: Arc<SummaryExtractor>,
    describer: ImageDescriber,
}

impl ContentProcessor {
    /// Processor backed by real HTTP; fetches and LLM calls share one timeout
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let fetcher = ContentFetcher::new(&config.fetch)?;
        let transport: Arc<dyn ChatTransport> =
            Arc::new(HttpChatTransport::new(config.fetch.timeout_secs)?);
        Ok(Self::with_parts(config, fetcher, transport))
    }

    /// Processor with a caller-supplied fetcher and chat transport
    pub fn with_parts(
        config: Arc<Config>,
        fetcher: ContentFetcher,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        let extractor = Arc::new(SummaryExtractor::new(transport, config.language.clone()));
        let describer = ImageDescriber::new(Arc::clone(&extractor));
        Self {
            config,
            fetcher,
            extractor,
            describer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn extractor(&self) -> Arc<SummaryExtractor> {
        Arc::clone(&self.extractor)
    }

    /// Classify, fetch and summarize `url`. The result's kind is the classified kind.
    pub async fn process_url(&self, url: &str) -> Result<ContentSummary> {
        let kind = classify(url);
        tracing::info!(url = %url, kind = %kind, "Detected content kind");

        let processor = self.config.llm.enabled_processor(kind)?;

        let mut summary = match self.fetcher.fetch(url, kind).await? {
            FetchedContent::Image(data_uri) => {
                self.describer.summarize(&data_uri, url, processor).await?
            }
            FetchedContent::Text(text) => self.extractor.extract(&text, url, processor).await?,
        };

        summary.kind = kind.to_string();
        tracing::debug!(url = %url, title = %summary.title, tags = ?summary.tags, "Processed URL");
        Ok(summary)
    }
}
