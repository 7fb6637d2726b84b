//! Terminal output formatter

use chrono::DateTime;
use toread_core::CollectionListItem;

fn short_date(rfc3339: &str) -> String {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}

fn format_item(item: &CollectionListItem, output: &mut String) {
    let c = &item.collection;
    output.push_str(&format!(
        "#{} [{}] {}  ({})\n",
        c.id,
        c.kind,
        c.title,
        short_date(&c.created_at)
    ));
    output.push_str(&format!("    {}\n", c.url));
    if !item.tags.is_empty() {
        output.push_str(&format!("    tags: {}\n", item.tags.join(", ")));
    }
    for line in c.description.lines().filter(|l| !l.trim().is_empty()) {
        output.push_str(&format!("    {}\n", line));
    }
}

pub fn format_collections(items: &[CollectionListItem]) -> String {
    if items.is_empty() {
        return "No collections\n".to_string();
    }

    let mut output = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        format_item(item, &mut output);
    }
    output
}

pub fn format_added(item: &CollectionListItem) -> String {
    let mut output = String::from("Saved collection\n");
    format_item(item, &mut output);
    output
}

pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags\n".to_string();
    }
    tags.iter().map(|t| format!("{}\n", t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use toread_core::{Collection, ContentKind};

    fn item() -> CollectionListItem {
        CollectionListItem {
            collection: Collection {
                id: 3,
                owner_id: 1,
                url: "https://blog.example/tokio".to_string(),
                kind: ContentKind::Text,
                title: "Inside Tokio".to_string(),
                description: "How the scheduler works.\n\nAnd the reactor.".to_string(),
                created_at: "2024-05-01T10:00:00+00:00".to_string(),
                updated_at: "2024-05-01T10:00:00+00:00".to_string(),
            },
            tags: vec!["rust".to_string(), "async".to_string()],
        }
    }

    #[test]
    fn test_item_layout() {
        let out = format_collections(&[item()]);
        assert_eq!(
            out,
            "#3 [text] Inside Tokio  (2024-05-01)\n    https://blog.example/tokio\n    tags: rust, async\n    How the scheduler works.\n    And the reactor.\n"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_collections(&[]), "No collections\n");
        assert_eq!(format_tags(&[]), "No tags\n");
    }
}
