//! Error types for the brisa client
//!
//! Every failure a call can produce falls into one of three kinds: the call
//! could not be formed ([`Error::Configuration`]), the exchange never
//! completed ([`Error::Network`]), or the server answered with an error
//! status ([`Error::HttpStatus`]). The last one keeps the response so callers
//! can still read what the portal sent back.

use brisa_transport::{HttpResponse, TransportError};
use http::StatusCode;
use thiserror::Error;

/// Result type alias for operations that can fail with a brisa error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the brisa client.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be formed: malformed target, relative target
    /// without a base URL, invalid per-request header, or rejected client
    /// options.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The raw transport failed before a response arrived (after retries).
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    /// The server answered with a status of 400 or above.
    #[error("HTTP error: {status}")]
    HttpStatus {
        /// Response status
        status: StatusCode,
        /// The full response, body unread
        response: Box<HttpResponse>,
    },
}

impl Error {
    /// Turn a response into an error when its status is 400 or above.
    pub(crate) fn classify(response: HttpResponse) -> Result<HttpResponse> {
        if response.status.as_u16() >= 400 {
            Err(Error::HttpStatus {
                status: response.status,
                response: Box::new(response),
            })
        } else {
            Ok(response)
        }
    }

    /// Status code of an [`Error::HttpStatus`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response carried by an [`Error::HttpStatus`].
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Error::HttpStatus { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// Take the response out of an [`Error::HttpStatus`].
    pub fn into_response(self) -> Option<HttpResponse> {
        match self {
            Error::HttpStatus { response, .. } => Some(*response),
            _ => None,
        }
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the raw transport failed.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// Whether the request could not be formed.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Whether the call was cut short by its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Network(TransportError::Timeout))
    }
}
