//! Integration tests for the OAuth redirect endpoint

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;
use untappd::oauth::OAuthHandler;

use common::{closed_url, FakeServer};

const REDIRECT: &str = "http://localhost:8080/";

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A handler whose token endpoint is served by `server`
async fn handler_for(server: &FakeServer) -> OAuthHandler {
    let base = server.start().await;
    OAuthHandler::new("id", "secret", REDIRECT)
        .unwrap()
        .with_authorize_url(format!("{base}/oauth/authorize/"))
}

// === Request validation ===

#[tokio::test]
async fn missing_code_returns_400() {
    let app = OAuthHandler::new("id", "secret", REDIRECT).unwrap().router();

    let resp = app.oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "no 'code' GET parameter");
}

#[tokio::test]
async fn empty_code_returns_400() {
    let app = OAuthHandler::new("id", "secret", REDIRECT).unwrap().router();

    let resp = app.oneshot(get("/?code=")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_is_not_allowed() {
    let app = OAuthHandler::new("id", "secret", REDIRECT).unwrap().router();

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/?code=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// === Token exchange ===

#[tokio::test]
async fn valid_code_returns_token() {
    let server = FakeServer::new().on(
        "/oauth/authorize/",
        200,
        r#"{"meta":{"http_code":200},"response":{"access_token":"ABCDEF"}}"#,
    );
    let app = handler_for(&server).await.router();

    let resp = app.oneshot(get("/?code=abc123")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "ABCDEF");

    let req = server.last_request();
    assert_eq!(req.query("client_id"), Some("id"));
    assert_eq!(req.query("client_secret"), Some("secret"));
    assert_eq!(req.query("response_type"), Some("code"));
    assert_eq!(req.query("redirect_url"), Some(REDIRECT));
    assert_eq!(req.query("code"), Some("abc123"));
}

#[tokio::test]
async fn custom_token_handler_renders_response() {
    let server = FakeServer::new().on(
        "/oauth/authorize/",
        200,
        r#"{"response":{"access_token":"ABCDEF"}}"#,
    );
    let app = handler_for(&server).await.router_with(Arc::new(|token: String| {
        (StatusCode::CREATED, format!("saved {token}")).into_response()
    }));

    let resp = app.oneshot(get("/?code=abc123")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_string(resp).await, "saved ABCDEF");
}

#[tokio::test]
async fn upstream_error_status_returns_502() {
    let server = FakeServer::new().on("/oauth/authorize/", 500, "{}");
    let app = handler_for(&server).await.router();

    let resp = app.oneshot(get("/?code=abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_string(resp).await, "authentication server error: HTTP 500");
}

#[tokio::test]
async fn upstream_non_json_returns_502() {
    let server = FakeServer::new().on_with_type("/oauth/authorize/", 200, "text/html", "<html></html>");
    let app = handler_for(&server).await.router();

    let resp = app.oneshot(get("/?code=abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_string(resp).await, "authentication server sent non-JSON content");
}

#[tokio::test]
async fn upstream_malformed_json_returns_502() {
    let server = FakeServer::new().on("/oauth/authorize/", 200, "{");
    let app = handler_for(&server).await.router();

    let resp = app.oneshot(get("/?code=abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn unreachable_upstream_returns_500() {
    let base = closed_url().await;
    let app = OAuthHandler::new("id", "secret", REDIRECT)
        .unwrap()
        .with_authorize_url(format!("{base}/oauth/authorize/"))
        .router();

    let resp = app.oneshot(get("/?code=abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
