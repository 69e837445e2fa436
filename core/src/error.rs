use std::fmt;

use thiserror::Error;

/// The error type for lakeload operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The shared key is malformed (not valid base64)
    CredentialInvalid,

    /// Request cannot be signed or constructed (missing required fields, etc.)
    RequestInvalid,

    /// The service answered with a non-success status
    HttpStatus(u16),

    /// The transport failed before a response was received
    Network,

    /// A record cannot be represented in the target encoding
    Serialization,

    /// Unexpected errors
    Unexpected,
}

impl ErrorKind {
    /// Whether an operation failing with this kind is worth retrying.
    ///
    /// Only transport faults and non-success responses qualify; a malformed
    /// credential, an unsignable request or an unencodable record will fail
    /// the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::HttpStatus(_) | ErrorKind::Network)
    }
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether the error is worth retrying, per its kind.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

// Convenience constructors
impl Error {
    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an error for a non-success response status
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HttpStatus(status), message)
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::HttpStatus(status) => write!(f, "http status {status}"),
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Serialization => write!(f, "serialization error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(Error::network("connection reset").is_retryable());
        assert!(Error::http_status(503, "service busy").is_retryable());
        assert!(Error::http_status(404, "no such path").is_retryable());

        assert!(!Error::credential_invalid("bad key").is_retryable());
        assert!(!Error::request_invalid("no authority").is_retryable());
        assert!(!Error::serialization("not json").is_retryable());
        assert!(!Error::unexpected("boom").is_retryable());
    }

    #[test]
    fn test_kind_survives_source_attachment() {
        let err = Error::http_status(500, "flush failed")
            .with_source(anyhow::anyhow!("underlying transport detail"));
        assert_eq!(err.kind(), ErrorKind::HttpStatus(500));
        assert_eq!(err.to_string(), "flush failed");
    }
}
