//! Shared helpers for driving the router in-process.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, HOST},
        Method, Request, StatusCode,
    },
    Router,
};
use octofit::storage::{AppConfig, Database};
use octofit::AppState;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// App that refreshes leaderboard rows on every activity write.
    pub fn refreshing() -> Self {
        let mut config = AppConfig::default();
        config.leaderboard.refresh_on_activity_write = true;
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let db = Arc::new(Database::open_in_memory().expect("Failed to create database"));
        let router = octofit::server::app(AppState::new(db.clone(), config));
        Self { router, db }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(HOST, "testserver");

        let body = match body {
            Some(json) => {
                request = request.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response")
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// POST and return the created record's id, asserting 201.
    pub async fn create(&self, uri: &str, body: Value) -> String {
        let (status, value) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "create {uri} failed: {value}");
        value["id"].as_str().expect("id in response").to_string()
    }
}

pub fn ids(records: &Value) -> Vec<String> {
    records
        .as_array()
        .expect("JSON array")
        .iter()
        .map(|r| r["id"].as_str().expect("id").to_string())
        .collect()
}
