//! HTTP surface: routes, JSON bodies and the OpenAPI document.

pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::dtos::{
        CheckCredibilityRequest, ErrorResponse, EvaluateCredibilityRequest,
        ExtractArticleRequest, ExtractArticleResponse,
    },
    app_state::AppState,
    assessment::{CredibilityResult, Evaluation, FakeArticleType},
    health::{self, HealthResponse},
};

pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::extract_article,
        handlers::evaluate_credibility,
        handlers::check_credibility,
        health::health_check
    ),
    components(schemas(
        ExtractArticleRequest,
        ExtractArticleResponse,
        EvaluateCredibilityRequest,
        CheckCredibilityRequest,
        ErrorResponse,
        CredibilityResult,
        Evaluation,
        FakeArticleType,
        HealthResponse
    )),
    tags(
        (name = "credibility", description = "News article extraction and credibility assessment"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(&REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http",
            method = %request.method(),
            uri = %request.uri(),
            request_id
        )
    });

    Router::new()
        .route("/api/extract-article", post(handlers::extract_article))
        .route("/api/evaluate-credibility", post(handlers::evaluate_credibility))
        .route("/api/check-credibility", post(handlers::check_credibility))
        .route("/healthz", get(health::health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
                .layer(trace)
                .layer(PropagateRequestIdLayer::new(REQUEST_ID)),
        )
}
