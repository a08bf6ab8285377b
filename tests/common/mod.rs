//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use trivia::http_server::{build_router, HttpServerConfig};
use trivia::query::QueryEngine;
use trivia::store::{seed_default_categories, InMemoryStore, NewQuestion, TriviaStore};

pub const LAKE_QUESTION: &str = "What is the largest lake in Africa called, title...";

/// Router over an in-memory store holding the default categories and
/// `questions` questions. The first question is [`LAKE_QUESTION`] in
/// Geography; the rest alternate between Science and History.
pub async fn seeded_app(questions: usize) -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    seed_default_categories(store.as_ref()).await.unwrap();

    for i in 0..questions {
        let (text, category) = match i {
            0 => (LAKE_QUESTION.to_string(), 3),
            n if n % 2 == 0 => (format!("Science question {}", n), 1),
            n => (format!("History question {}", n), 4),
        };
        store
            .insert_question(NewQuestion {
                question: text,
                answer: format!("answer {}", i),
                difficulty: 1 + (i % 5) as i32,
                category,
            })
            .await
            .unwrap();
    }

    (app(Arc::clone(&store)), store)
}

pub fn app<S: TriviaStore>(store: Arc<S>) -> Router {
    build_router(&HttpServerConfig::default(), QueryEngine::new(store))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    send(router, "GET", uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> TestResponse {
    send(router, "POST", uri, Some(body)).await
}

pub async fn delete(router: &Router, uri: &str) -> TestResponse {
    send(router, "DELETE", uri, None).await
}

/// Assert the shared error envelope
pub fn assert_error(response: &TestResponse, status: u16, message: &str) {
    assert_eq!(response.status.as_u16(), status, "body: {}", response.body);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], status);
    assert_eq!(response.body["message"], message);
}

pub fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}
