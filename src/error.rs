use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;

/// Application-level errors surfaced through the HTTP API
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Malformed catalog input. Raised while building the catalog at startup.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Item {index} has feature dimension {found}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate title {title:?} (case-insensitive)")]
    DuplicateTitle { title: String },

    #[error("Item {index} has an empty title")]
    EmptyTitle { index: usize },

    #[error("Item {title:?} has a non-finite feature value")]
    NonFiniteFeature { title: String },

    #[error("Catalog file error: {0}")]
    Source(String),
}

/// Lookup of a catalog index outside `[0, len)`
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Index {index} out of range for catalog of size {len}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Failure of a remote metadata lookup
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Title not found: {0}")]
    NotFound(String),

    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Metadata API returned status {0}")]
    Status(u16),

    #[error("Malformed metadata response: {0}")]
    Malformed(String),

    #[error("Metadata fetch timed out after {0:?}")]
    Timeout(Duration),
}
