use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Marker appended whenever text is cut to a character budget.
pub const TRUNCATION_MARKER: &str = "...";

/// Which path of the extractor produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtractionSource {
    /// The first element matched by this selector had enough text.
    Selector(&'static str),
    /// Whole `<body>` with boilerplate elements skipped.
    Fallback,
}

/// Whitespace-normalized article body, capped at [`super::MAX_ARTICLE_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleText {
    pub text: String,
    pub source: ExtractionSource,
    pub truncated: bool,
}

impl ArticleText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// First `max_chars` characters followed by the marker, used as a response preview.
    /// The marker is always appended, matching what clients of the check endpoint expect.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.text.chars().take(max_chars).collect();
        preview.push_str(TRUNCATION_MARKER);
        preview
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Collapses every whitespace run (including newlines and NBSP) into one space and trims.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Cuts `text` to `max_chars` characters, appending [`TRUNCATION_MARKER`] if anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut cut = text[..byte_idx].to_string();
            cut.push_str(TRUNCATION_MARKER);
            (cut, true)
        }
        None => (text.to_string(), false),
    }
}
