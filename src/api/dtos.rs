use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ExtractArticleRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExtractArticleResponse {
    pub content: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EvaluateCredibilityRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckCredibilityRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
