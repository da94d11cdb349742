use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

use crate::prompt::NO_TYPE;

/// Leading `"N번: "` some replies keep in front of a category name.
static ORDINAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+번\s*:\s*").unwrap());

/// Closed set of fake-article categories. Serialized as the Korean label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FakeArticleType {
    #[serde(rename = "허위 사실 포함 기사")]
    FalseFacts,
    #[serde(rename = "과장된 제목 기사")]
    ExaggeratedHeadline,
    #[serde(rename = "조작된 이미지 포함 기사")]
    ManipulatedImage,
    #[serde(rename = "광고성 기사")]
    Advertorial,
    #[default]
    #[serde(rename = "유형 없음")]
    NoType,
}

impl FakeArticleType {
    /// The four real categories in ordinal order (`1번` .. `4번`).
    pub const CATEGORIES: [FakeArticleType; 4] = [
        FakeArticleType::FalseFacts,
        FakeArticleType::ExaggeratedHeadline,
        FakeArticleType::ManipulatedImage,
        FakeArticleType::Advertorial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FakeArticleType::FalseFacts => "허위 사실 포함 기사",
            FakeArticleType::ExaggeratedHeadline => "과장된 제목 기사",
            FakeArticleType::ManipulatedImage => "조작된 이미지 포함 기사",
            FakeArticleType::Advertorial => "광고성 기사",
            FakeArticleType::NoType => NO_TYPE,
        }
    }

    pub fn ordinal(self) -> Option<&'static str> {
        match self {
            FakeArticleType::FalseFacts => Some("1번"),
            FakeArticleType::ExaggeratedHeadline => Some("2번"),
            FakeArticleType::ManipulatedImage => Some("3번"),
            FakeArticleType::Advertorial => Some("4번"),
            FakeArticleType::NoType => None,
        }
    }

    /// Maps an ordinal token such as `"2번"` to its category.
    pub fn from_ordinal(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::CATEGORIES
            .into_iter()
            .find(|category| category.ordinal() == Some(token))
    }

    /// Exact label match, including the no-type marker.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::CATEGORIES
            .into_iter()
            .chain(std::iter::once(FakeArticleType::NoType))
            .find(|category| category.label() == label)
    }

    /// Resolves a free-text category value from a model reply.
    ///
    /// Strips a leading ordinal prefix, then tries the ordinal table, an exact
    /// label, and finally the first label contained in the text. Anything else
    /// is `NoType`, so raw tokens never leak out.
    pub fn resolve(raw: &str) -> Self {
        let stripped = ORDINAL_PREFIX.replace(raw.trim(), "");
        let value = stripped.trim();

        if let Some(category) = Self::from_ordinal(value) {
            return category;
        }
        if let Some(category) = Self::from_label(value) {
            return category;
        }

        let value = value.trim_matches(|c| matches!(c, '"' | '\'' | '[' | ']' | '*'));
        if let Some(category) = Self::from_label(value) {
            return category;
        }
        if value.starts_with(NO_TYPE) {
            return FakeArticleType::NoType;
        }
        Self::CATEGORIES
            .into_iter()
            .find(|category| value.contains(category.label()))
            .unwrap_or(FakeArticleType::NoType)
    }
}
