//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use toread_core::{CollectionListItem, ContentKind};

pub fn format_collections(items: &[CollectionListItem], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_collections(items),
        OutputFormat::Cli => terminal::format_collections(items),
    }
}

pub fn format_added(item: &CollectionListItem, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_collection(item),
        OutputFormat::Cli => terminal::format_added(item),
    }
}

pub fn format_tags(tags: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_tags(tags),
        OutputFormat::Cli => terminal::format_tags(tags),
    }
}

pub fn format_summary(summary: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_summary(summary),
        OutputFormat::Cli => format!("{}\n", summary.trim_end()),
    }
}

pub fn format_classification(url: &str, kind: ContentKind, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_classification(url, kind),
        OutputFormat::Cli => format!("{}\n", kind),
    }
}
