//! Cloud client error types

use thiserror::Error;

/// Errors returned by the cloud API client
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cloud API error: status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid cloud URL: {0}")]
    InvalidUrl(String),

    #[error("invalid project token: {0}")]
    InvalidToken(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
