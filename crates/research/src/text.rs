//! Text normalization shared across extraction and synthesis.

/// Normalize one extracted text fragment.
///
/// Characters that could break later text embedding into prompts or JSON
/// (double quotes, backslashes, newlines) are replaced, and the fragment
/// is trimmed.
pub fn clean_fragment(text: &str) -> String {
    text.replace('"', "'")
        .replace('\\', "")
        .replace('\n', " ")
        .trim()
        .to_string()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
