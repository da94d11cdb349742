use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::{
    api::dtos::{
        CheckCredibilityRequest, ErrorResponse, EvaluateCredibilityRequest,
        ExtractArticleRequest, ExtractArticleResponse,
    },
    app_state::AppState,
    assessment::{CredibilityResult, Evaluation},
    service::CheckError,
};

/// Reports whether the check result came from the cache (`HIT`) or a fresh run (`MISS`).
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_server_error() {
            error!(error = %self, detail = ?self, "request failed");
        } else {
            warn!(error = %self, "rejected request");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.public_message().to_string(),
            }),
        )
            .into_response()
    }
}

/// An unreadable body is treated like one without the field.
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(%rejection, "unreadable request body");
            T::default()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/extract-article",
    tag = "credibility",
    request_body = ExtractArticleRequest,
    responses(
        (status = 200, description = "Extracted article text", body = ExtractArticleResponse),
        (status = 400, description = "Missing url", body = ErrorResponse),
        (status = 500, description = "Page could not be fetched or read", body = ErrorResponse)
    )
)]
pub async fn extract_article(
    State(state): State<AppState>,
    payload: Result<Json<ExtractArticleRequest>, JsonRejection>,
) -> Response {
    let request = body_or_default(payload);
    let url = request.url.unwrap_or_default();

    match state.service.extract_only(&url).await {
        Ok(content) => (StatusCode::OK, Json(ExtractArticleResponse { content })).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/evaluate-credibility",
    tag = "credibility",
    request_body = EvaluateCredibilityRequest,
    responses(
        (status = 200, description = "Quick credibility assessment", body = Evaluation),
        (status = 400, description = "Missing content", body = ErrorResponse),
        (status = 500, description = "Assessment failed", body = ErrorResponse)
    )
)]
pub async fn evaluate_credibility(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateCredibilityRequest>, JsonRejection>,
) -> Response {
    let request = body_or_default(payload);
    let content = request.content.unwrap_or_default();

    match state.service.evaluate_only(&content).await {
        Ok(evaluation) => (StatusCode::OK, Json(evaluation)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/check-credibility",
    tag = "credibility",
    request_body = CheckCredibilityRequest,
    responses(
        (status = 200, description = "Full credibility assessment", body = CredibilityResult,
            headers(("x-cache" = String, description = "HIT or MISS"))),
        (status = 400, description = "Missing url or no article body", body = ErrorResponse),
        (status = 500, description = "Fetch or assessment failed", body = ErrorResponse)
    )
)]
pub async fn check_credibility(
    State(state): State<AppState>,
    payload: Result<Json<CheckCredibilityRequest>, JsonRejection>,
) -> Response {
    let request = body_or_default(payload);
    let url = request.url.unwrap_or_default();

    match state.service.check_credibility(&url).await {
        Ok((result, cache_status)) => (
            StatusCode::OK,
            [(X_CACHE, cache_status.as_str())],
            Json(result.as_ref()),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
