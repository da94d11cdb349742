use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::extractor::model::ExtractionSource;

/// Article body containers in priority order. The first one whose first match
/// carries enough text wins; later selectors are not scored against it.
pub const ARTICLE_SELECTORS: [&str; 11] = [
    "article",
    ".article-body",
    ".article-content",
    ".post-content",
    "#article-body",
    "main article",
    ".news-body",
    ".content",
    ".article-text",
    ".entry-content",
    ".post-body",
];

/// Subtrees skipped when falling back to the whole body.
pub const STRIPPED_ELEMENTS: [&str; 6] = ["script", "style", "nav", "header", "footer", "aside"];

/// A selector match longer than this stops the search. The last match is
/// still kept over the fallback when it has at least this many characters.
pub const MIN_SELECTOR_CHARS: usize = 100;

static COMPILED_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    ARTICLE_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok().map(|selector| (*css, selector)))
        .collect()
});

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Returns trimmed, not yet normalized, article text and the path that produced it.
pub fn read(document: &Html) -> (String, ExtractionSource) {
    let mut last_match: Option<(String, &'static str)> = None;

    for (css, selector) in COMPILED_SELECTORS.iter() {
        let Some(element) = document.select(selector).next() else {
            continue;
        };
        let text = element.text().collect::<String>().trim().to_string();
        let chars = text.chars().count();
        last_match = Some((text, *css));
        if chars > MIN_SELECTOR_CHARS {
            break;
        }
    }

    match last_match {
        Some((text, css)) if text.chars().count() >= MIN_SELECTOR_CHARS => {
            (text, ExtractionSource::Selector(css))
        }
        _ => (fallback_text(document), ExtractionSource::Fallback),
    }
}

fn fallback_text(document: &Html) -> String {
    let mut out = String::new();
    if let Some(body) = document.select(&BODY_SELECTOR).next() {
        collect_visible_text(body, &mut out);
    }
    out.trim().to_string()
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if !STRIPPED_ELEMENTS.contains(&child_element.value().name()) {
                collect_visible_text(child_element, out);
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}
