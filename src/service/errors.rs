use axum::http::StatusCode;
use thiserror::Error;

use crate::fetcher::FetchError;
use crate::llm::LlmError;

const MSG_URL_REQUIRED: &str = "URL이 필요합니다.";
const MSG_CONTENT_REQUIRED: &str = "기사 내용이 필요합니다.";
const MSG_EXTRACTION_FAILED: &str = "기사 내용을 추출할 수 없습니다.";
const MSG_NO_ARTICLE_BODY: &str = "기사 본문을 찾을 수 없습니다.";
const MSG_ASSESSMENT_FAILED: &str = "신뢰도 평가 중 오류가 발생했습니다.";

/// Missing request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Url,
    Content,
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("missing required field: {0:?}")]
    Validation(MissingField),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("extracted article too short ({chars} chars)")]
    InsufficientContent { chars: usize },

    #[error("completion failed: {0}")]
    Capability(#[from] LlmError),
}

impl CheckError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckError::Validation(_) | CheckError::InsufficientContent { .. } => {
                StatusCode::BAD_REQUEST
            }
            CheckError::Fetch(_) | CheckError::Extraction(_) | CheckError::Capability(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Localized message safe to show to callers; carries no internal detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            CheckError::Validation(MissingField::Url) => MSG_URL_REQUIRED,
            CheckError::Validation(MissingField::Content) => MSG_CONTENT_REQUIRED,
            CheckError::Extraction(_) => MSG_EXTRACTION_FAILED,
            CheckError::InsufficientContent { .. } => MSG_NO_ARTICLE_BODY,
            CheckError::Fetch(_) | CheckError::Capability(_) => MSG_ASSESSMENT_FAILED,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
