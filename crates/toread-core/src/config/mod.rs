//! Configuration management

pub mod prompts;

use crate::content::ContentKind;
use crate::error::{Result, ToReadError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database location (falls back to the cache dir)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Natural language used for titles, descriptions, tags and reports
    #[serde(default = "default_language")]
    pub language: String,

    /// Outbound fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Per-kind LLM processors
    #[serde(default)]
    pub llm: LlmConfig,

    /// Aggregate summary settings
    #[serde(default)]
    pub summary: SummaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            language: default_language(),
            fetch: FetchConfig::default(),
            llm: LlmConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

/// Settings shared by every outbound page/image fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Readability proxy; the original URL is appended verbatim
    #[serde(default = "default_reader_proxy")]
    pub reader_proxy: String,

    /// Client-wide request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Upper bound on page text forwarded to the LLM, in bytes
    #[serde(default = "default_max_content_bytes")]
    pub max_content_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            reader_proxy: default_reader_proxy(),
            timeout_secs: default_timeout(),
            max_content_bytes: default_max_content_bytes(),
        }
    }
}

/// One LLM processor: where to send requests for a content kind and how
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Unset means the kind's default: text and image on, video off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Full chat-completions URL
    #[serde(default = "default_endpoint")]
    pub api_endpoint: String,

    #[serde(default = "default_api_key")]
    pub api_key: String,

    #[serde(default = "default_chat_model")]
    pub model: String,

    /// System prompt; `{language}` is substituted at request time
    #[serde(default)]
    pub prompt: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl ProcessorConfig {
    fn for_kind(kind: ContentKind, prompt: &str) -> Self {
        Self {
            enabled: Some(default_enabled(kind)),
            api_endpoint: default_endpoint(),
            api_key: default_api_key(),
            model: default_chat_model(),
            prompt: prompt.to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Processors keyed by content kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_text_processor")]
    pub text: ProcessorConfig,

    #[serde(default = "default_image_processor")]
    pub image: ProcessorConfig,

    #[serde(default = "default_video_processor")]
    pub video: ProcessorConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            text: default_text_processor(),
            image: default_image_processor(),
            video: default_video_processor(),
        }
    }
}

impl LlmConfig {
    /// Processor configured for a kind, enabled or not
    pub fn processor(&self, kind: ContentKind) -> &ProcessorConfig {
        match kind {
            ContentKind::Text => &self.text,
            ContentKind::Image => &self.image,
            ContentKind::Video => &self.video,
        }
    }

    pub fn processor_mut(&mut self, kind: ContentKind) -> &mut ProcessorConfig {
        match kind {
            ContentKind::Text => &mut self.text,
            ContentKind::Image => &mut self.image,
            ContentKind::Video => &mut self.video,
        }
    }

    /// Resolve an unset `enabled` and an empty prompt to the kind's defaults
    pub fn fill_defaults(&mut self) {
        for kind in ContentKind::ALL {
            let processor = self.processor_mut(kind);
            processor.enabled.get_or_insert(default_enabled(kind));
            if processor.prompt.trim().is_empty() {
                processor.prompt = default_prompt(kind).to_string();
            }
        }
    }

    pub fn is_enabled(&self, kind: ContentKind) -> bool {
        self.processor(kind)
            .enabled
            .unwrap_or_else(|| default_enabled(kind))
    }

    /// Processor for a kind, or a configuration error if it cannot be used
    pub fn enabled_processor(&self, kind: ContentKind) -> Result<&ProcessorConfig> {
        if !self.is_enabled(kind) {
            return Err(ToReadError::Config(format!(
                "{} processor is not enabled",
                kind
            )));
        }
        let processor = self.processor(kind);
        if processor.api_endpoint.trim().is_empty() || processor.model.trim().is_empty() {
            return Err(ToReadError::Config(format!(
                "{} processor needs both an API endpoint and a model",
                kind
            )));
        }
        Ok(processor)
    }
}

/// Settings for the multi-collection report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_summary_prompt")]
    pub prompt: String,

    #[serde(default = "default_summary_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_summary_temperature")]
    pub temperature: f32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            prompt: default_summary_prompt(),
            max_tokens: default_summary_max_tokens(),
            temperature: default_summary_temperature(),
        }
    }
}

fn default_language() -> String {
    std::env::var("TOREAD_LANGUAGE").unwrap_or_else(|_| "English".to_string())
}

fn default_reader_proxy() -> String {
    std::env::var("TOREAD_READER_PROXY").unwrap_or_else(|_| "https://r.jina.ai/".to_string())
}

fn default_enabled(kind: ContentKind) -> bool {
    !matches!(kind, ContentKind::Video)
}

fn default_prompt(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Image => prompts::DEFAULT_IMAGE_PROMPT,
        ContentKind::Text | ContentKind::Video => prompts::DEFAULT_TEXT_PROMPT,
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_content_bytes() -> usize {
    60_000
}

fn default_endpoint() -> String {
    std::env::var("TOREAD_LLM_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string())
}

fn default_api_key() -> String {
    std::env::var("TOREAD_LLM_API_KEY").unwrap_or_default()
}

fn default_chat_model() -> String {
    std::env::var("TOREAD_LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.3
}

fn default_text_processor() -> ProcessorConfig {
    ProcessorConfig::for_kind(ContentKind::Text, prompts::DEFAULT_TEXT_PROMPT)
}

fn default_image_processor() -> ProcessorConfig {
    ProcessorConfig::for_kind(ContentKind::Image, prompts::DEFAULT_IMAGE_PROMPT)
}

fn default_video_processor() -> ProcessorConfig {
    ProcessorConfig::for_kind(ContentKind::Video, prompts::DEFAULT_TEXT_PROMPT)
}

fn default_summary_prompt() -> String {
    prompts::DEFAULT_SUMMARY_PROMPT.to_string()
}

fn default_summary_max_tokens() -> u32 {
    1500
}

fn default_summary_temperature() -> f32 {
    1.0
}

impl Config {
    /// Load config from `TOREAD_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load config from a file; a missing file yields defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let mut config: Config = serde_yaml::from_str(&content)?;
            config.llm.fill_defaults();
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Write config as YAML, creating parent directories
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TOREAD_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_processor_is_config_error() {
        let mut config = Config::default();
        config.llm.video.enabled = Some(false);
        let err = config.llm.enabled_processor(ContentKind::Video).unwrap_err();
        assert!(matches!(err, ToReadError::Config(_)));
        assert!(err.to_string().contains("video processor is not enabled"));
    }

    #[test]
    fn test_processor_dispatch() {
        let mut config = Config::default();
        config.llm.image.model = "vision-model".to_string();
        assert_eq!(config.llm.processor(ContentKind::Image).model, "vision-model");
        config.llm.processor_mut(ContentKind::Text).model = "text-model".to_string();
        assert_eq!(config.llm.text.model, "text-model");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
language: Deutsch
llm:
  text:
    enabled: true
    api_endpoint: http://localhost:8000/v1/chat/completions
    model: local-model
    prompt: "Summarize in {language}"
summary:
  max_tokens: 900
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.language, "Deutsch");
        assert_eq!(config.llm.text.model, "local-model");
        assert_eq!(config.llm.text.max_tokens, 1000);
        assert_eq!(config.summary.max_tokens, 900);
        assert!((config.summary.temperature - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_missing_prompt_is_filled_on_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "llm:\n  image:\n    model: vision\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.llm.image.enabled, Some(true));
        assert_eq!(config.llm.image.model, "vision");
        assert_eq!(config.llm.image.prompt, prompts::DEFAULT_IMAGE_PROMPT);
        assert_eq!(config.llm.text.prompt, prompts::DEFAULT_TEXT_PROMPT);
    }

    #[test]
    fn test_partial_block_keeps_kind_default_enabled() {
        let config: Config = serde_yaml::from_str("llm:\n  video:\n    model: m\n").unwrap();
        assert_eq!(config.llm.video.enabled, None);
        assert!(!config.llm.is_enabled(ContentKind::Video));
        assert!(config.llm.enabled_processor(ContentKind::Video).is_err());

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "llm:\n  video:\n    model: m\n  text:\n    model: t\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.llm.video.enabled, Some(false));
        assert_eq!(config.llm.text.enabled, Some(true));

        std::fs::write(&path, "llm:\n  video:\n    enabled: true\n    model: m\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.llm.enabled_processor(ContentKind::Video).unwrap().model, "m");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yml");

        let mut config = Config::default();
        config.fetch.reader_proxy = "http://proxy.local/".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.fetch.reader_proxy, "http://proxy.local/");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(dir.path().join("absent.yml")).unwrap();
        assert_eq!(config.summary.max_tokens, 1500);
    }
}
