//! Error taxonomy for the BuscaPé client.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the client.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing construction parameters.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A call parameter failed validation. Raised before any network I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The service answered HTTP 401. The message depends on the environment
    /// active at the time of the call.
    #[error("{message}")]
    Authorization {
        message: String,
        /// The request URL that was rejected.
        url: String,
    },

    /// Network-level failure propagated from the transport, not retried.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures below the HTTP response level.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS resolution, connect, or timeout failure.
    #[error("no connection available: {0}")]
    Unreachable(String),

    /// The request was sent but no usable response came back.
    #[error("http transport error: {message}")]
    Http {
        status: Option<u16>,
        message: String,
    },
}

impl Error {
    /// Convenience predicate for validation failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
