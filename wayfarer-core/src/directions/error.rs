use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from [`crate::directions::DirectionsProvider::get_directions`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum DirectionsError {
    /// A query coordinate is not a finite WGS84 position.
    ///
    /// Callers should validate requests before planning to avoid this.
    #[error("query contains an invalid coordinate")]
    InvalidInput,

    /// The service answered but returned no usable route.
    #[error("directions service returned no route")]
    EmptyResponse,

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL without credentials.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL without credentials.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// The request failed before a response arrived.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// Request URL without credentials.
        url: String,
        /// Error description.
        message: String,
    },

    /// The service reported an error in its response body.
    #[error("directions service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `"NoRoute"`.
        code: String,
        /// Service-provided message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse directions response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
}
