//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Status code and machine-readable code sent to clients.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Db(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                (StatusCode::CONFLICT, "conflict")
            }
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        }
    }

    /// Database errors never reach the client verbatim; only the constraint name survives.
    fn client_message(&self) -> (String, Option<serde_json::Value>) {
        match self {
            AppError::Db(sqlx::Error::RowNotFound) => ("record not found".into(), None),
            AppError::Db(sqlx::Error::Database(db)) => {
                let details = db
                    .constraint()
                    .map(|c| serde_json::json!({ "constraint": c }));
                let message = if db.is_unique_violation() {
                    "a record with this value already exists".to_string()
                } else {
                    "database operation failed".to_string()
                };
                (message, details)
            }
            AppError::Db(_) => ("database operation failed".into(), None),
            AppError::Config(_) => ("server misconfigured".into(), None),
            other => (other.to_string(), None),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let (message, details) = self.client_message();
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::NotFound("account 3".into()), StatusCode::NOT_FOUND, "not_found")]
    #[case(AppError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY, "validation_error")]
    #[case(AppError::Conflict("x".into()), StatusCode::CONFLICT, "conflict")]
    #[case(AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "unauthorized")]
    #[case(AppError::Forbidden("x".into()), StatusCode::FORBIDDEN, "forbidden")]
    #[case(AppError::Db(sqlx::Error::RowNotFound), StatusCode::NOT_FOUND, "not_found")]
    #[case(AppError::Db(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR, "database_error")]
    fn maps_errors_to_status(#[case] err: AppError, #[case] status: StatusCode, #[case] code: &str) {
        assert_eq!(err.status_and_code(), (status, code));
    }

    #[test]
    fn database_errors_are_not_echoed() {
        let (message, details) = AppError::Db(sqlx::Error::PoolTimedOut).client_message();
        assert_eq!(message, "database operation failed");
        assert!(details.is_none());
    }

    #[tokio::test]
    async fn error_body_has_code_and_message() {
        let response = AppError::Forbidden("admin only".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "forbidden");
        assert_eq!(body["error"]["message"], "forbidden: admin only");
    }
}
