use std::fs;

use crate::extractor::{ExtractionSource, MAX_ARTICLE_CHARS, extract, normalize_whitespace};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_semantic_article() {
    let result = extract(&fixture("article.html"));

    assert_eq!(result.source, ExtractionSource::Selector("article"));
    assert!(result.text.starts_with("정부, 내년도 예산안 발표 기획재정부는"));
    assert!(result.text.contains("공식 기관 인용"));
    assert!(!result.text.contains("많이 본 뉴스"));
    assert!(!result.text.contains("Copyright"));
    assert!(!result.text.contains('\n'));
    assert!(!result.truncated);
}

#[test]
fn test_selected_text_equals_normalized_element_text() {
    let body = "첫 문단입니다.\n\n   둘째 문단은   공백이 많습니다. ".repeat(8);
    let html = format!(
        "<html><body><nav>menu</nav><div class=\"news-body\">  {body}  </div></body></html>"
    );

    let result = extract(&html);

    assert_eq!(result.source, ExtractionSource::Selector(".news-body"));
    assert_eq!(result.text, normalize_whitespace(&body));
}

#[test]
fn test_short_container_is_skipped_for_later_selector() {
    let result = extract(&fixture("blog.html"));

    assert_eq!(result.source, ExtractionSource::Selector(".entry-content"));
    assert!(result.text.contains("Building better software"));
    assert!(result.text.contains("Key Principles"));
    assert!(!result.text.contains("Sidebar teaser"));
}

#[test]
fn test_fallback_strips_boilerplate() {
    let result = extract(&fixture("portal.html"));

    assert_eq!(result.source, ExtractionSource::Fallback);
    assert_eq!(
        result.text,
        "속보 시청 앞 광장에서 대규모 행사가 열렸다. 주최 측은 약 만 명이 참석했다고 밝혔다."
    );
    for noise in ["Portal header", "Sports", "ad slot", "display", "Trending", "privacy", "tracking"] {
        assert!(!result.text.contains(noise), "leaked boilerplate: {noise}");
    }
}

#[test]
fn test_short_article_falls_back_to_body() {
    let result = extract("<html><body><article>Short</article></body></html>");

    assert_eq!(result.source, ExtractionSource::Fallback);
    assert_eq!(result.text, "Short");
}

#[test]
fn test_long_article_is_truncated_with_marker() {
    let html = format!(
        "<html><body><article>{}</article></body></html>",
        "기사 본문 ".repeat(2000)
    );

    let result = extract(&html);

    assert!(result.truncated);
    assert!(result.text.ends_with("..."));
    assert_eq!(result.char_len(), MAX_ARTICLE_CHARS + 3);
}

#[test]
fn test_empty_document() {
    let result = extract("");

    assert_eq!(result.source, ExtractionSource::Fallback);
    assert!(result.text.is_empty());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract(&html);
        }

        #[test]
        fn test_extract_output_is_normalized(html in ".*") {
            let result = extract(&html);
            prop_assert!(!result.text.contains("  "));
            prop_assert!(!result.text.contains('\n'));
            prop_assert!(result.char_len() <= MAX_ARTICLE_CHARS + 3);
        }
    }
}
