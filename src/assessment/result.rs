use serde::Serialize;
use utoipa::ToSchema;

use crate::assessment::{FakeArticleType, ParsedAssessment};

/// Final output of the combined check; what the cache stores per URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredibilityResult {
    pub credibility_score: u32,
    pub fake_article_type: FakeArticleType,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub reason: String,
    /// The model reply exactly as received.
    #[serde(rename = "fullResponse")]
    pub raw_response: String,
    /// At most 500 characters of the article followed by `...`.
    #[serde(rename = "articleContent")]
    pub article_preview: String,
}

impl CredibilityResult {
    pub fn new(parsed: ParsedAssessment, raw_response: String, article_preview: String) -> Self {
        Self {
            credibility_score: parsed.credibility_score,
            fake_article_type: parsed.fake_article_type,
            summary: parsed.summary,
            recommendations: parsed.recommendations,
            reason: parsed.reason,
            raw_response,
            article_preview,
        }
    }
}

/// Output of the evaluate-only operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub credibility_score: u32,
    pub fake_article_type: FakeArticleType,
    #[serde(rename = "fullResponse")]
    pub raw_response: String,
}
