//! Domain-level error type.
//!
//! Transport agnostic: the HTTP adapter maps [`ErrorKind`] to a status code,
//! while the serialized body carries only the failure message. Every handler
//! failure, whether raised during validation or surfaced by a persistence
//! adapter, collapses into this one type so clients see a uniform error
//! schema.

use serde::Serialize;
use utoipa::ToSchema;

/// Classification of a handler failure, driving the HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The payload or query string failed structural validation.
    Validation,
    /// A unique constraint was violated by the requested write.
    Conflict,
    /// The record to operate on does not exist.
    NotFound,
    /// The persistence layer rejected the shape of the query itself.
    MalformedQuery,
    /// Anything else; reported without further classification.
    Internal,
}

/// Error payload returned to clients.
///
/// ## Serialisation contract
/// The wire body is `{"message": <failure description>}`; the classification
/// kind is not serialized and only selects the status code.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorKind};
///
/// let err = Error::not_found("user not found");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.message(), "user not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Error {
    #[serde(skip)]
    kind: ErrorKind,
    #[schema(example = "user not found")]
    message: String,
}

impl Error {
    /// Create a new error with an explicit classification.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classification of this failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable failure description returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorKind::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::MalformedQuery`].
    pub fn malformed_query(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedQuery, message)
    }

    /// Convenience constructor for [`ErrorKind::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_message_only() {
        let err = Error::conflict("name already taken");
        let value = serde_json::to_value(&err).expect("serialise error");

        assert_eq!(
            value,
            serde_json::json!({ "message": "name already taken" })
        );
    }

    #[test]
    fn display_matches_message() {
        let err = Error::internal("database query failed");
        assert_eq!(err.to_string(), "database query failed");
    }
}
