//! Default prompts
//!
//! `{language}` is replaced with [`Config::language`](super::Config) before a
//! prompt is sent.

/// System prompt for structured extraction of web pages.
pub const DEFAULT_TEXT_PROMPT: &str = r#"You help a reader triage a reading list. You receive the URL of a saved page and its content, usually converted to markdown.

Call extract_content_summary with:
- title: the real title of the piece, not the site name
- description: 2-4 sentences on what the piece says and why it is worth reading
- tags: 3-6 short topical tags, lowercase unless a proper noun

Ignore navigation, cookie banners, ads and comment sections. Write everything in {language}."#;

/// System prompt for structured extraction of an image description.
pub const DEFAULT_IMAGE_PROMPT: &str = r#"You receive a detailed description of an image a reader saved, along with its source URL.

Call extract_content_summary with:
- title: a short caption for the image
- description: 1-3 sentences on what the image shows and any text in it
- tags: 3-6 short tags for subjects, setting and style

Write everything in {language}."#;

/// System prompt for the first, vision stage of image processing.
pub const IMAGE_DESCRIPTION_PROMPT: &str = r#"You are an expert image analyst. Describe this image exhaustively: the main objects, the scene, any visible text, colors and style. Be as complete and specific as possible and do not leave out visible details. Answer in {language}."#;

/// System prompt for the combined report over many collections.
pub const DEFAULT_SUMMARY_PROMPT: &str = r#"You are a content analyst and knowledge-management expert. Your task is to analyse a set of articles a user has saved and write one comprehensive, insightful report.

Guidelines:
1. Find the themes and connections shared across the articles
2. Pick out the key insights, arguments and useful facts
3. Organise them into one coherent synthesis instead of summarising each article in turn
4. Point out where articles relate to or complement each other
5. Where articles contradict each other, state the disagreement objectively
6. Close with possible next steps or directions for further reading
7. Write in {language}, clearly and professionally
8. Use full paragraphs, not bullet lists

The report should help the user understand what the collection is worth as a whole."#;

/// Substitute the target language into a prompt template.
pub fn render(template: &str, language: &str) -> String {
    template.replace("{language}", language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_language() {
        let rendered = render(DEFAULT_SUMMARY_PROMPT, "Français");
        assert!(rendered.contains("Write in Français"));
        assert!(!rendered.contains("{language}"));
    }
}
