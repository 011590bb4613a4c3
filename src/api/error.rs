//! HTTP error mapping.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::ValidationError;
use crate::storage::DatabaseError;

/// Field reported for uniqueness violations caught by the store itself.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store unavailable: {0}")]
    Unavailable(DatabaseError),
}

impl ApiError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(what) => ApiError::NotFound(what),
            DatabaseError::ConstraintViolation(message) => {
                ApiError::Validation(ValidationError::new(NON_FIELD_ERRORS, message))
            }
            other => ApiError::Unavailable(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::new("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(ValidationError::new("query", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::NotFound(_) => json!({
                "code": "not_found",
                "error": self.to_string(),
            }),
            ApiError::Validation(err) => json!({
                "code": "invalid",
                "error": self.to_string(),
                "field": err.field,
                "reason": err.reason,
            }),
            ApiError::Unavailable(err) => {
                error!("Store failure: {err}");
                json!({
                    "code": "unavailable",
                    "error": "Service temporarily unavailable",
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
