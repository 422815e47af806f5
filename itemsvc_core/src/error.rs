//! Error types for each layer of the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Outcome classification produced by the storage layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Failure(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound(err.to_string()),
            _ => RepositoryError::Failure(err.to_string()),
        }
    }
}

/// Machine-usable kind of an [`ItemError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotModified,
    StorageFailure,
}

/// Error returned by every item manager operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("{0}")]
    NotFound(String),

    #[error("Not modified")]
    NotModified,

    #[error("{0}")]
    StorageFailure(String),
}

impl ItemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ItemError::NotFound(_) => ErrorKind::NotFound,
            ItemError::NotModified => ErrorKind::NotModified,
            ItemError::StorageFailure(_) => ErrorKind::StorageFailure,
        }
    }
}

impl From<RepositoryError> for ItemError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ItemError::NotFound(msg),
            RepositoryError::Failure(msg) => ItemError::StorageFailure(msg),
        }
    }
}

/// Errors surfaced at the HTTP boundary and during bootstrap.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Item(#[from] ItemError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Item(err) => match err.kind() {
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                // 304 must not carry a body
                ErrorKind::NotModified => return StatusCode::NOT_MODIFIED.into_response(),
                ErrorKind::StorageFailure => {
                    tracing::error!("Storage failure: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::IoError(err) => {
                tracing::error!("IO error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
