use axum::{Router, body::Body, http::Request, response::Response};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use credcheck::{
    api::create_router,
    app_state::AppState,
    cache::CredibilityCache,
    fetcher::HttpFetcher,
    llm::ChatCompletionClient,
    service::CredibilityService,
};

pub const FULL_REPLY: &str = "기사의 신뢰도 : 40 %
가짜 기사 유형 : 과장된 제목 기사
요약 : 제목은 전면 폐쇄를 주장하지만 본문은 일부 학교의 일정 조정만 다룬다.
추천 검색어 : [교육부 발표], [학교 일정 조정], [팩트체크]
판단 근거 : 제목의 '전면 폐쇄'는 본문 어디에서도 뒷받침되지 않는다.";

/// Router wired to real HTTP clients; the completion endpoint lives on `openai`.
pub fn test_app(openai: &MockServer, api_key: Option<&str>) -> Router {
    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let llm = ChatCompletionClient::new(
        api_key.map(str::to_string),
        format!("{}/v1", openai.uri()),
        "gpt-4o-mini",
        Duration::from_secs(5),
    )
    .unwrap();
    let service = CredibilityService::new(
        Arc::new(fetcher),
        Arc::new(llm),
        Arc::new(CredibilityCache::default()),
    );

    create_router(AppState::new(service))
}

pub fn article_html() -> String {
    format!(
        "<html><head><title>속보</title></head><body><nav>메뉴</nav><article><h1>전국 학교 전면 폐쇄</h1><p>{}</p></article><footer>저작권</footer></body></html>",
        "교육청은 일부 학교의 학사 일정을 조정한다고 밝혔다. ".repeat(10)
    )
}

pub async fn mount_article(server: &MockServer, route: &str, html: String, expected_fetches: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"),
        )
        .expect(expected_fetches)
        .mount(server)
        .await;
}

pub async fn mount_completion(server: &MockServer, content: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
