//! Typed errors and HTTP mapping.
//!
//! Handlers decide which of the three client-facing kinds a failure belongs to;
//! `IntoResponse for AppError` is the only place a kind becomes a status code and body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("invalid connection url in {key}: {reason}")]
    Url { key: &'static str, reason: String },
}

/// Failures raised by a [`crate::store::TriviaStore`] or the migration helpers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("in-memory store lock poisoned")]
    Poisoned,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    /// A store failure on a path with no per-endpoint policy (the listings).
    /// Same JSON shape with 500, matching the stock server error the service always returned there.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed client-facing message; the detail carried by the variant only goes to the log.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "Bad Request",
            AppError::NotFound(_) => "Requested page not found",
            AppError::Unprocessable(_) => "Request was unprocessable",
            AppError::Store(_) => "Internal Server Error",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_has_fixed_shape() {
        let (status, json) = body_json(AppError::NotFound("question 2600".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], 404);
        assert_eq!(json["message"], "Requested page not found");
    }

    #[tokio::test]
    async fn detail_is_not_leaked_to_client() {
        let (status, json) = body_json(AppError::Unprocessable("difficulty: 'abc'".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["message"], "Request was unprocessable");
        assert!(!json.to_string().contains("abc"));
    }

    #[tokio::test]
    async fn bad_request_and_store_errors() {
        let (status, json) = body_json(AppError::BadRequest("quiz".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], 400);
        assert_eq!(json["message"], "Bad Request");

        let (status, json) = body_json(AppError::from(StoreError::Poisoned)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], 500);
    }
}
