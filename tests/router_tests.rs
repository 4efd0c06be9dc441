// tests/router_tests.rs

mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use quiz_platform::routes;
use tower::ServiceExt;

async fn app() -> Router {
    routes::create_router(common::test_state().await)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_is_served_at_api_root() {
    let response = app()
        .await
        .oneshot(Request::get("/api/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let request = Request::post("/api/quizzes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app().await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn missing_content_type_is_a_bad_request() {
    let request = Request::post("/api/quizzes")
        .body(Body::from(r#"{"title":"t","subject":"s","questions":[]}"#))
        .unwrap();

    let response = app().await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_lists_every_endpoint() {
    let response = app()
        .await
        .oneshot(Request::get("/api/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/",
        "/api/quizzes",
        "/api/quizzes/{id}",
        "/api/quizzes/{id}/attempt",
        "/api/results/{id}",
        "/api/admin/results",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let request = Request::get("/api/quizzes")
        .header(header::ORIGIN, "http://frontend.test")
        .body(Body::empty())
        .unwrap();

    let response = app().await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn cors_only_echoes_configured_origins() {
    let mut state = common::test_state().await;
    state.config.cors_origins = vec!["http://a.test".to_string()];
    let app = routes::create_router(state);

    let request = Request::get("/api/quizzes")
        .header(header::ORIGIN, "http://evil.test")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );

    let request = Request::get("/api/quizzes")
        .header(header::ORIGIN, "http://a.test")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://a.test"
    );
}
