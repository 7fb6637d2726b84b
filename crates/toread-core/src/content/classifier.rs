//! URL content-kind classification

use crate::error::{Result, ToReadError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const IMAGE_SUFFIXES: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];
const VIDEO_SUFFIXES: &[&str] = &[".mp4", ".avi", ".mov", ".webm"];
const VIDEO_HOST_PATTERNS: &[&str] = &[
    "youtube.com/watch",
    "youtu.be/",
    "vimeo.com/",
    "bilibili.com/video/",
];

/// Kind of content behind a saved URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    Video,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Text, ContentKind::Image, ContentKind::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::Video => "video",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ToReadError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ContentKind::Text),
            "image" => Ok(ContentKind::Image),
            "video" => Ok(ContentKind::Video),
            other => Err(ToReadError::InvalidInput(format!(
                "Unknown content kind: {}",
                other
            ))),
        }
    }
}

/// Classify a URL by suffix and known video hosts. Never fails; text is the default.
pub fn classify(url: &str) -> ContentKind {
    let lower = url.to_lowercase();
    let path = strip_query_and_fragment(&lower);

    if IMAGE_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
        return ContentKind::Image;
    }

    if VIDEO_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
        || VIDEO_HOST_PATTERNS
            .iter()
            .any(|pattern| lower.contains(pattern))
    {
        return ContentKind::Video;
    }

    ContentKind::Text
}

fn strip_query_and_fragment(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
