//! Crate-wide error type.

use thiserror::Error;

use crate::validation::UrlError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the message models and the protocol contract.
///
/// URL validation failures are not errors of this type unless a caller asks
/// for them explicitly (see [`crate::validation::try_parse_url`]).
#[derive(Debug, Error)]
pub enum Error {
    /// A protocol hook was called on a transport that does not provide it.
    #[error("{0} is not implemented by this transport")]
    NotImplemented(&'static str),

    /// `assemble` received something that is neither a request nor a response.
    #[error("HTTP message not supported")]
    UnsupportedMessage,

    /// The body has not been read yet, so the message cannot be materialized.
    #[error("message body is missing")]
    ContentMissing,

    /// A read hook found no further message on its connection.
    #[error("connection closed before a message was read")]
    ConnectionClosed,

    #[error("invalid URL: {0}")]
    Url(#[from] UrlError),

    #[error("invalid method: {0:?}")]
    InvalidMethod(String),

    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid request target: {0}")]
    InvalidTarget(String),

    #[error("unsupported HTTP version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("invalid reason phrase: {0:?}")]
    InvalidReason(String),

    #[error("invalid status code: {0}")]
    InvalidStatus(u16),
}
