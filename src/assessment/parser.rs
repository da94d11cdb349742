//! Line-anchored extraction of typed fields from a free-text model reply.
//!
//! Every field is optional and independently parsed; a missing or garbled
//! field falls back to its default and never fails the whole reply.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::assessment::FakeArticleType;
use crate::prompt::{
    CATEGORY_THRESHOLD, KEYWORDS_LABEL, MIN_REASON_CHARS, Mode, NO_TYPE, NONE, REASON_LABEL,
    SCORE_LABEL, SUMMARY_LABEL, TYPE_LABEL,
};

/// Upper bound on recommended search keywords kept from a reply.
pub const MAX_RECOMMENDATIONS: usize = 3;

// Both ASCII and full-width colons are accepted after a label.
static SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}\s*[:：]\s*(\d+)\s*%", regex::escape(SCORE_LABEL))).unwrap()
});
static QUICK_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{}\s*[:：]\s*(\d+번|{})",
        regex::escape(TYPE_LABEL),
        regex::escape(NO_TYPE)
    ))
    .unwrap()
});
static FULL_TYPE: LazyLock<Regex> = LazyLock::new(|| line_field(TYPE_LABEL));
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| line_field(SUMMARY_LABEL));
static KEYWORDS: LazyLock<Regex> = LazyLock::new(|| line_field(KEYWORDS_LABEL));
static REASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s){}\s*[:：]\s*(.+)", regex::escape(REASON_LABEL))).unwrap()
});

fn line_field(label: &str) -> Regex {
    Regex::new(&format!(r"{}\s*[:：]\s*([^\n]+)", regex::escape(label))).unwrap()
}

/// Typed view of a model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedAssessment {
    /// Passed through as written by the model; not clamped to 0..=100.
    pub credibility_score: u32,
    pub fake_article_type: FakeArticleType,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub reason: String,
}

impl Default for ParsedAssessment {
    fn default() -> Self {
        Self {
            credibility_score: 0,
            fake_article_type: FakeArticleType::NoType,
            summary: NONE.to_string(),
            recommendations: Vec::new(),
            reason: NONE.to_string(),
        }
    }
}

impl ParsedAssessment {
    /// True when a low-scoring reply came back with less rationale than the prompt asks for.
    pub fn reason_is_short(&self) -> bool {
        self.credibility_score < CATEGORY_THRESHOLD
            && self.reason.chars().count() < MIN_REASON_CHARS
    }
}

/// Parses `raw` according to the template requested by `mode`.
///
/// Quick replies only yield score and category; summary, keywords and
/// rationale keep their defaults.
pub fn parse(raw: &str, mode: Mode) -> ParsedAssessment {
    let mut parsed = ParsedAssessment {
        credibility_score: parse_score(raw),
        ..ParsedAssessment::default()
    };

    match mode {
        Mode::Quick => {
            parsed.fake_article_type = parse_quick_type(raw);
        }
        Mode::Full => {
            parsed.fake_article_type = parse_full_type(raw);
            if let Some(summary) = parse_summary(raw) {
                parsed.summary = summary;
            }
            parsed.recommendations = parse_keywords(raw);
            if let Some(reason) = parse_reason(raw) {
                parsed.reason = reason;
            }
        }
    }

    parsed
}

fn parse_score(raw: &str) -> u32 {
    SCORE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

fn parse_quick_type(raw: &str) -> FakeArticleType {
    match QUICK_TYPE.captures(raw).and_then(|caps| caps.get(1)) {
        Some(token) => FakeArticleType::from_ordinal(token.as_str()).unwrap_or_default(),
        // The model sometimes answers with a name despite the ordinal template.
        None => parse_full_type(raw),
    }
}

fn parse_full_type(raw: &str) -> FakeArticleType {
    FULL_TYPE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| FakeArticleType::resolve(m.as_str()))
        .unwrap_or_default()
}

/// Greedy multi-line capture: continues over following non-empty lines until
/// one starts with the keywords or rationale label.
fn parse_summary(raw: &str) -> Option<String> {
    let first = SUMMARY.captures(raw)?.get(1)?;
    let mut summary = first.as_str().trim_end().to_string();

    // `first` ends at a newline or at the end of the reply.
    for line in raw[first.end()..].split('\n').skip(1) {
        if line.trim().is_empty() || starts_sibling_label(line) {
            break;
        }
        summary.push('\n');
        summary.push_str(line.trim_end());
    }

    let summary = summary.trim();
    (!summary.is_empty()).then(|| summary.to_string())
}

fn starts_sibling_label(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with(KEYWORDS_LABEL) || line.starts_with(REASON_LABEL)
}

fn parse_keywords(raw: &str) -> Vec<String> {
    let Some(line) = KEYWORDS.captures(raw).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };
    let line = line.as_str().trim();
    if line == NONE {
        return Vec::new();
    }

    line.split(',')
        .map(|token| {
            let token = token.trim();
            let token = token.strip_prefix('[').unwrap_or(token);
            let token = token.strip_suffix(']').unwrap_or(token);
            token.trim().to_string()
        })
        .filter(|token| !token.is_empty())
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

fn parse_reason(raw: &str) -> Option<String> {
    let reason = REASON.captures(raw)?.get(1)?.as_str().trim();
    (!reason.is_empty()).then(|| reason.to_string())
}
