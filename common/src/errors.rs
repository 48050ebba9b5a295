//! Application error taxonomy.
//!
//! Three classes of failure cross the HTTP boundary:
//! - client input errors (missing or malformed parameter) -> 400
//! - not-found (query ran, zero rows) -> 404
//! - store errors (any sqlx failure) -> 500, detail logged server-side only

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Result alias used throughout the services.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required query parameter was not supplied.
    #[error("{0}")]
    MissingParameter(String),

    /// A query parameter was supplied but is malformed.
    #[error("{0}")]
    InvalidParameter(String),

    /// The query executed successfully but matched no rows.
    #[error("{0}")]
    NotFound(String),

    /// The underlying store failed (connectivity, syntax, constraint).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingParameter(msg) | AppError::InvalidParameter(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            AppError::Database(e) => {
                // Never leak store internals to the client.
                tracing::error!(error = %e, "store query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error." }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_parameter_maps_to_400_error_body() {
        let (status, body) = body_json(AppError::MissingParameter(
            "Please provide a company parameter.".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please provide a company parameter.");
    }

    #[tokio::test]
    async fn not_found_maps_to_404_message_body() {
        let (status, body) = body_json(AppError::NotFound(
            "No data found for the given date.".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No data found for the given date.");
    }

    #[tokio::test]
    async fn store_errors_never_leak_detail() {
        let (status, body) = body_json(AppError::Database(sqlx::Error::PoolClosed)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error.");
        assert!(body.get("message").is_none());
    }
}
