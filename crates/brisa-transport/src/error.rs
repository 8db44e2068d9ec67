//! Transport error types

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors raised while performing a single exchange with the network.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established or was dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The deadline for the exchange passed.
    #[error("Timeout")]
    Timeout,

    /// The caller cancelled the exchange.
    #[error("Request cancelled")]
    Cancelled,

    /// Generic protocol-level failure reported by the HTTP stack.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Reading or writing a body failed.
    #[error("Body error: {0}")]
    Body(String),

    /// The request could not be built (bad method, header or URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Whether repeating the exchange could succeed.
    ///
    /// Cancellation, unbuildable requests and broken bodies fail the same way
    /// every time; everything else is treated as a transient network fault.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout | Self::Http(_) | Self::Io(_) | Self::Other(_) => {
                true
            }
            Self::Cancelled | Self::Body(_) | Self::InvalidRequest(_) => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
