//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use library_engine::ErrorKind;
use serde::Serialize;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Library(#[from] library_engine::Error),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Library(e) => {
                let status = match e.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Conflict => StatusCode::CONFLICT,
                    ErrorKind::Invalid => StatusCode::BAD_REQUEST,
                };
                tracing::debug!("Request rejected ({}): {}", status, e);
                (status, e.to_string(), None)
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Invalid request".to_string(),
                Some(msg.clone()),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Check if a SQL error is a unique constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        // PostgreSQL unique violation code is "23505"
        db_err.code().map(|c| c == "23505").unwrap_or(false)
    } else {
        false
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use library_engine::Error;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn library_errors_map_by_kind() {
        assert_eq!(
            status_of(Error::MemberNotFound(1).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(Error::BookNotHeld {
                member_id: 1,
                book_id: 2
            }
            .into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(Error::QuotaExhausted(1).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(Error::BookBorrowed(1).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(Error::InvalidTitle("x".into()).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn database_errors_are_internal() {
        assert_eq!(
            status_of(sqlx::Error::RowNotFound.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn bad_request() {
        assert_eq!(
            status_of(AppError::BadRequest("missing body".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
