use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A database error.
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// A database pool error.
    #[error("Database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// A database pool creation error.
    #[error("Database pool creation error: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    /// A row was missing an expected column.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Registration attempted with an email that already has an account.
    #[error("Email is used")]
    DuplicateEmail,

    /// An authentication error.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A password hashing error.
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// A token signing or verification error.
    #[error("Signing error: {0}")]
    Signing(String),

    /// An outbound mail error.
    #[error("Mail error: {0}")]
    Mail(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // The legacy contract surfaces duplicate accounts and bad
            // credentials as 400, not 409/401.
            AppError::DuplicateEmail => {
                tracing::warn!("Registration rejected: email already in use");
                (StatusCode::BAD_REQUEST, "Email is used".to_string())
            }

            AppError::Authentication(ref msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            // Everything else is an infrastructure failure. The caller gets
            // the opaque legacy message and a correlation id; the detail
            // stays in the log.
            ref other => {
                let error_id = Uuid::new_v4();
                tracing::error!(%error_id, "Internal error: {}", other);

                let body = sonic_rs::to_string(&sonic_rs::json!({
                    "message": "Error 500",
                    "errorId": error_id.to_string(),
                }))
                .unwrap_or_else(|_| r#"{"message":"Error 500"}"#.to_string());

                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "message": message
        }))
        .unwrap_or_else(|_| r#"{"message":"Error 500"}"#.to_string());

        (status, body).into_response()
    }
}
