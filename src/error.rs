//! Error types for loading snapshot inputs
//!
//! The aggregation functions never fail; these errors only come from reading
//! files, decoding service responses and parsing settings.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// The service answered with `success: false`
    #[error("{resource} request failed: {message}")]
    Api { resource: String, message: String },

    #[error("invalid date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
