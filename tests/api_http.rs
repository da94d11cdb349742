mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use credcheck::fetcher::{HttpFetcher, PageFetcher};
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use helpers::{
    FULL_REPLY, article_html, body_json, mount_article, mount_completion, post_json, test_app,
};

#[tokio::test]
async fn test_mounted_article_is_served_as_html() {
    let site = MockServer::start().await;
    mount_article(&site, "/news/html", article_html(), 1).await;

    let page = HttpFetcher::new(Duration::from_secs(5))
        .unwrap()
        .fetch(&format!("{}/news/html", site.uri()))
        .await
        .unwrap();

    assert!(page.status.is_success());
    assert!(page.body_utf8.contains("교육청은"));
}

#[tokio::test]
async fn test_check_is_idempotent_and_fetches_once() {
    let site = MockServer::start().await;
    let openai = MockServer::start().await;
    mount_article(&site, "/news/a", article_html(), 1).await;
    mount_completion(&openai, FULL_REPLY, 1).await;

    let app = test_app(&openai, Some("test-key"));
    let url = format!("{}/news/a", site.uri());

    let first = app
        .clone()
        .oneshot(post_json("/api/check-credibility", json!({ "url": url })))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-cache"], "MISS");
    assert!(first.headers().contains_key("x-request-id"));
    let first = body_json(first).await;

    assert_eq!(first["credibilityScore"], 40);
    assert_eq!(first["fakeArticleType"], "과장된 제목 기사");
    assert_eq!(
        first["recommendations"],
        json!(["교육부 발표", "학교 일정 조정", "팩트체크"])
    );
    assert_eq!(first["fullResponse"], FULL_REPLY);
    let preview = first["articleContent"].as_str().unwrap();
    assert!(preview.starts_with("전국 학교 전면 폐쇄"));
    assert!(preview.ends_with("..."));
    assert!(!preview.contains("메뉴"));

    let second = app
        .oneshot(post_json("/api/check-credibility", json!({ "url": url })))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers()["x-cache"], "HIT");
    assert_eq!(body_json(second).await, first);
}

#[tokio::test]
async fn test_check_cache_key_ignores_case_and_surrounding_whitespace() {
    let site = MockServer::start().await;
    let openai = MockServer::start().await;
    mount_article(&site, "/news/b", article_html(), 1).await;
    mount_completion(&openai, FULL_REPLY, 1).await;

    let app = test_app(&openai, Some("test-key"));
    let url = format!("{}/news/b", site.uri());

    let first = app
        .clone()
        .oneshot(post_json("/api/check-credibility", json!({ "url": url })))
        .await
        .unwrap();
    assert_eq!(first.headers()["x-cache"], "MISS");

    let shouted = format!("  {}  ", url.to_uppercase());
    let second = app
        .oneshot(post_json("/api/check-credibility", json!({ "url": shouted })))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers()["x-cache"], "HIT");
}

#[tokio::test]
async fn test_short_article_fails_check_but_extracts() {
    let site = MockServer::start().await;
    let openai = MockServer::start().await;
    mount_article(
        &site,
        "/short",
        "<html><body><article>Short</article></body></html>".to_string(),
        2,
    )
    .await;
    mount_completion(&openai, FULL_REPLY, 0).await;

    let app = test_app(&openai, Some("test-key"));
    let url = format!("{}/short", site.uri());

    let check = app
        .clone()
        .oneshot(post_json("/api/check-credibility", json!({ "url": url })))
        .await
        .unwrap();
    assert_eq!(check.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(check).await["error"], "기사 본문을 찾을 수 없습니다.");

    let extract = app
        .oneshot(post_json("/api/extract-article", json!({ "url": url })))
        .await
        .unwrap();
    assert_eq!(extract.status(), StatusCode::OK);
    assert_eq!(body_json(extract).await, json!({ "content": "Short" }));
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let openai = MockServer::start().await;
    let app = test_app(&openai, Some("test-key"));

    let cases = [
        ("/api/extract-article", json!({}), "URL이 필요합니다."),
        ("/api/check-credibility", json!({ "url": "" }), "URL이 필요합니다."),
        ("/api/evaluate-credibility", json!({ "content": "  " }), "기사 내용이 필요합니다."),
    ];

    for (uri, body, message) in cases {
        let response = app.clone().oneshot(post_json(uri, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["error"], message, "{uri}");
    }
}

#[tokio::test]
async fn test_missing_api_key_is_opaque_server_error_and_not_cached() {
    let site = MockServer::start().await;
    let openai = MockServer::start().await;
    mount_article(&site, "/news/c", article_html(), 2).await;
    mount_completion(&openai, FULL_REPLY, 0).await;

    let app = test_app(&openai, None);
    let url = format!("{}/news/c", site.uri());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/api/check-credibility", json!({ "url": url })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "신뢰도 평가 중 오류가 발생했습니다." })
        );
    }
}

#[tokio::test]
async fn test_upstream_404_on_check_is_server_error() {
    let site = MockServer::start().await;
    let openai = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&site)
        .await;

    let app = test_app(&openai, Some("test-key"));
    let response = app
        .oneshot(post_json(
            "/api/check-credibility",
            json!({ "url": format!("{}/gone", site.uri()) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_evaluate_maps_quick_ordinal() {
    let openai = MockServer::start().await;
    mount_completion(&openai, "기사의 신뢰도 : 20 %\n가짜 기사 유형 : 4번", 1).await;

    let app = test_app(&openai, Some("test-key"));
    let response = app
        .oneshot(post_json(
            "/api/evaluate-credibility",
            json!({ "content": "지금 바로 구매하세요! 광고 링크 포함" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["credibilityScore"], 20);
    assert_eq!(body["fakeArticleType"], "광고성 기사");
}

#[tokio::test]
async fn test_health_and_openapi_document() {
    let openai = MockServer::start().await;
    let app = test_app(&openai, Some("test-key"));

    let health = app
        .clone()
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(
        body_json(health).await,
        json!({ "status": "OK", "cacheEntries": 0, "capability": "configured" })
    );

    let doc = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(doc.status(), StatusCode::OK);
    let doc = body_json(doc).await;
    assert!(doc["paths"]["/api/check-credibility"]["post"].is_object());
}
