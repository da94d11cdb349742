//! Heuristic article-body extraction from arbitrary HTML.
//!
//! A fixed, ordered selector table is tried first; if the last matching
//! selector carries fewer than [`reader::MIN_SELECTOR_CHARS`] characters the
//! whole body is used with script, style and page-chrome elements skipped. The result is whitespace
//! normalized and capped at [`MAX_ARTICLE_CHARS`].

pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::{ArticleText, ExtractionSource, normalize_whitespace, truncate_chars};

use scraper::Html;
use tracing::debug;

pub const MAX_ARTICLE_CHARS: usize = 5000;

pub fn extract(html: &str) -> ArticleText {
    let document = Html::parse_document(html);
    let (raw, source) = reader::read(&document);

    let normalized = normalize_whitespace(&raw);
    let (text, truncated) = truncate_chars(&normalized, MAX_ARTICLE_CHARS);

    debug!(?source, chars = text.chars().count(), truncated, "extracted article text");

    ArticleText {
        text,
        source,
        truncated,
    }
}
