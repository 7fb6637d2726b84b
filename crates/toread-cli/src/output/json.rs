//! JSON output formatter

use serde::Serialize;
use toread_core::{CollectionListItem, ContentKind};

fn pretty<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string()) + "\n"
}

pub fn format_collections(items: &[CollectionListItem]) -> String {
    pretty(items, "[]")
}

pub fn format_collection(item: &CollectionListItem) -> String {
    pretty(item, "{}")
}

pub fn format_tags(tags: &[String]) -> String {
    pretty(&serde_json::json!({ "tags": tags }), "{}")
}

pub fn format_summary(summary: &str) -> String {
    pretty(&serde_json::json!({ "summary": summary }), "{}")
}

pub fn format_classification(url: &str, kind: ContentKind) -> String {
    pretty(&serde_json::json!({ "url": url, "kind": kind }), "{}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_object() {
        let out = format_tags(&["a".to_string(), "b".to_string()]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!({"tags": ["a", "b"]}));
    }

    #[test]
    fn test_kind_is_lowercase() {
        let out = format_classification("https://x/y.png", ContentKind::Image);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["kind"], "image");
    }
}
