//! Two-stage image summarization: vision description, then structured extraction

use super::client::{complete, ChatMessage, ChatRequest, ContentPart, ImageUrl};
use super::extractor::{ContentSummary, SummaryExtractor};
use crate::config::{prompts, ProcessorConfig};
use crate::error::Result;
use std::sync::Arc;

const DESCRIPTION_MAX_TOKENS: u32 = 1000;
const DESCRIPTION_TEMPERATURE: f32 = 0.5;

/// Turns an image into text the structured extractor can work with
pub struct ImageDescriber {
    extractor: Arc<SummaryExtractor>,
}

impl ImageDescriber {
    pub fn new(extractor: Arc<SummaryExtractor>) -> Self {
        Self { extractor }
    }

    /// Vision request for an image given as a data URI
    pub fn build_request(
        &self,
        data_uri: &str,
        url: &str,
        processor: &ProcessorConfig,
    ) -> ChatRequest {
        let language = self.extractor.language();
        ChatRequest {
            model: processor.model.clone(),
            messages: vec![
                ChatMessage::system(prompts::render(prompts::IMAGE_DESCRIPTION_PROMPT, language)),
                ChatMessage::user_parts(vec![
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: data_uri.to_string(),
                        },
                    },
                    ContentPart::Text {
                        text: format!(
                            "Describe the content of this image in detail. The image comes from URL: {}",
                            url
                        ),
                    },
                ]),
            ],
            functions: Vec::new(),
            function_call: None,
            max_tokens: DESCRIPTION_MAX_TOKENS,
            temperature: DESCRIPTION_TEMPERATURE,
        }
    }

    /// Stage 1: free-text description of the image
    pub async fn describe(
        &self,
        data_uri: &str,
        url: &str,
        processor: &ProcessorConfig,
    ) -> Result<String> {
        let request = self.build_request(data_uri, url, processor);
        tracing::debug!(
            url = %url,
            model = %request.model,
            image_bytes = data_uri.len(),
            "Sending image description request"
        );
        let response = complete(self.extractor.transport(), processor, &request).await?;
        let choice = response.into_first_choice()?;
        Ok(choice.message.content.unwrap_or_default())
    }

    /// Stage 1 then stage 2 with the same processor
    pub async fn summarize(
        &self,
        data_uri: &str,
        url: &str,
        processor: &ProcessorConfig,
    ) -> Result<ContentSummary> {
        let description = self.describe(data_uri, url, processor).await?;
        tracing::debug!(url = %url, description = %description, "Image description");
        self.extractor.extract(&description, url, processor).await
    }
}
