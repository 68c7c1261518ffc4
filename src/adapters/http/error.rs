//! Error types for the REST backend adapter

use thiserror::Error;

/// REST adapter error type
#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response decoding error: {0}")]
    Decode(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, HttpClientError>;
