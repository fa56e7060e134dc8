//! Editor Errors

use thiserror::Error;

/// Failures the resource editor can raise.
///
/// HTTP status codes never show up here: a 4xx/5xx answer is still a
/// completion.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Unable to create the HTTP request object")]
    TransportUnavailable(#[source] reqwest::Error),
    #[error("Invalid content manager URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Malformed resource response: {0}")]
    MalformedResponse(String),
    #[error("No resource path to load")]
    EmptyIdentifier,
    #[error("Failed to encode resource payload")]
    Encode(#[source] serde_json::Error),
}
