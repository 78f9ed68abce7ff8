//! Common test utilities for integration tests
//!
//! A fake Untappd server on a random local port. Responses are configured
//! per path and every request is recorded for inspection.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

/// A request as the fake server saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn form(&self) -> HashMap<String, String> {
        url_pairs(&self.body)
    }
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Debug, Clone, Default)]
pub struct FakeServer {
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `path` with a JSON body and status
    pub fn on(self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.on_with_type(path, status, "application/json", body)
    }

    pub fn on_with_type(
        self,
        path: &str,
        status: u16,
        content_type: &'static str,
        body: impl Into<String>,
    ) -> Self {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            Canned {
                status,
                content_type,
                body: body.into(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests()
            .pop()
            .expect("fake server received no requests")
    }

    /// Starts serving and returns the server's base URL
    pub async fn start(&self) -> String {
        let router = Router::new().fallback(handle).with_state(self.clone());
        serve(router).await
    }
}

/// Serves a router on 127.0.0.1 with a random port
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn handle(
    State(server): State<FakeServer>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    server.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query: url_pairs(uri.query().unwrap_or_default()),
        headers,
        body,
    });

    let canned = server.routes.lock().unwrap().get(uri.path()).cloned();
    match canned {
        Some(canned) => (
            StatusCode::from_u16(canned.status).unwrap(),
            [
                (header::CONTENT_TYPE, canned.content_type.to_string()),
                (header::HeaderName::from_static("x-ratelimit-limit"), "100".to_string()),
                (header::HeaderName::from_static("x-ratelimit-remaining"), "99".to_string()),
            ],
            canned.body,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "no canned response").into_response(),
    }
}

fn url_pairs(encoded: &str) -> HashMap<String, String> {
    encoded
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |s: &str| urlencoding::decode(&s.replace('+', " ")).unwrap().into_owned();
            (decode(key), decode(value))
        })
        .collect()
}

// === Canned payloads ===

pub fn envelope(response: Value) -> String {
    json!({
        "meta": { "code": 200, "response_time": { "time": 12, "measure": "milliseconds" } },
        "notifications": [],
        "response": response
    })
    .to_string()
}

pub fn error_json(code: i64, error_type: &str, detail: &str) -> String {
    json!({
        "meta": {
            "code": code,
            "error_detail": detail,
            "error_type": error_type,
            "developer_friendly": "",
            "response_time": { "time": 0, "measure": "seconds" }
        },
        "response": []
    })
    .to_string()
}

pub fn user(name: &str) -> Value {
    json!({
        "uid": 1,
        "user_name": name,
        "first_name": "Greg",
        "last_name": "Avola",
        "is_supporter": 1,
        "user_avatar": "https://gravatar.com/avatar/1?size=100",
        "user_avatar_hd": "https://gravatar.com/avatar/1?size=500",
        "stats": { "total_badges": 10, "total_friends": 3, "total_checkins": 4471, "total_beers": 2000 }
    })
}

pub fn checkin(id: i64, comment: &str) -> Value {
    json!({
        "checkin_id": id,
        "created_at": "Sat, 13 Dec 2014 19:15:38 +0000",
        "checkin_comment": comment,
        "rating_score": 4,
        "user": user("gregavola"),
        "beer": { "bid": 7481, "beer_name": "Brooklyn Bowl Pale Ale", "beer_abv": 5.2 },
        "brewery": { "brewery_id": 1954, "brewery_name": "Kelso of Brooklyn", "brewery_active": 1 },
        "venue": [],
        "comments": { "count": 0, "items": [] },
        "toasts": { "count": 0, "items": [] },
        "badges": { "count": 0, "items": [] },
        "media": { "count": 0, "items": [] }
    })
}
