//! Error types

use thiserror::Error;

/// Errors raised while building, sending or decoding a request
///
/// Every variant carries owned strings so a failed body resolution can be
/// replayed to later callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// The request could not be built by the transport (bad header, bad url)
    #[error("Request build error: {0}")]
    Build(String),
    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Response body could not be decoded into the requested type
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// A JSON decode was attempted against a payload that is not JSON
    #[error("Cannot decode non-JSON payload as JSON (content type: {})", .content_type.as_deref().unwrap_or("none"))]
    UnsupportedContentType {
        /// Content type the decision was made on
        content_type: Option<String>,
    },
    /// The response entity stream was already read
    #[error("Response body has already been consumed")]
    BodyConsumed,
    /// Other transport error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else if err.is_builder() {
            HttpError::Build(err.to_string())
        } else if err.is_connect() {
            HttpError::Connection(err.to_string())
        } else if err.is_decode() {
            HttpError::Deserialization(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            HttpError::Other(err.to_string())
        } else {
            HttpError::Deserialization(err.to_string())
        }
    }
}

impl From<serde_urlencoded::ser::Error> for HttpError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}
