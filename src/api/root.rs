//! `GET /`: links to every collection.

use axum::{
    http::{header::HOST, HeaderMap},
    Json,
};
use serde_json::{Map, Value};

const COLLECTIONS: [&str; 5] = ["users", "teams", "activities", "leaderboard", "workouts"];

pub async fn api_root(headers: HeaderMap) -> Json<Value> {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    Json(Value::Object(collection_links(host)))
}

fn collection_links(host: &str) -> Map<String, Value> {
    COLLECTIONS
        .iter()
        .map(|name| (name.to_string(), Value::String(format!("http://{host}/{name}"))))
        .collect()
}
