//! Error types for oracle transport.
//!
//! Schema violations in an otherwise-delivered reply are NOT errors; they
//! are a [`crate::ReplyDecode::Malformed`] value, so callers branch on the
//! tag instead of catching.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("oracle endpoint error ({status}): {body}")]
    Endpoint { status: u16, body: String },

    /// No API key in the environment.
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
