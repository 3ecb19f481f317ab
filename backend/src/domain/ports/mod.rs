//! Port abstractions implemented by the persistence adapters.
//!
//! Handlers depend only on these traits; the Diesel adapters in
//! `outbound::persistence` provide the production implementations, and tests
//! substitute in-memory doubles.

mod order_repository;
mod product_repository;
mod user_repository;

pub use order_repository::OrderRepository;
pub use product_repository::ProductRepository;
pub use user_repository::UserRepository;

use crate::domain::Error;

/// Window into an ordered result set. Both bounds are non-negative by
/// construction at the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

/// Sort orders accepted by the user listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSortOrder {
    /// Creation timestamp ascending.
    Oldest,
    /// Creation timestamp descending; also the fallback for unrecognised
    /// order values.
    #[default]
    Newest,
}

/// Sort orders accepted by the product listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSortOrder {
    /// Price ascending.
    PriceLowest,
    /// Price descending.
    PriceHighest,
    /// Creation timestamp ascending.
    Oldest,
    /// Creation timestamp descending; also the fallback for unrecognised
    /// order values.
    #[default]
    Newest,
}

/// Failures raised by repository adapters.
///
/// The constructors mirror the classification the HTTP layer needs: only
/// `MalformedQuery`, `NotFound`, and `UniqueViolation` are client errors;
/// connection and unclassified query failures stay internal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Repository connection could not be established or was lost.
    #[error("database connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("database query failed: {message}")]
    Query { message: String },
    /// The persistence layer rejected the shape of the query.
    #[error("malformed database query: {message}")]
    MalformedQuery { message: String },
    /// The record to operate on does not exist.
    #[error("{message}")]
    NotFound { message: String },
    /// A unique constraint rejected the write.
    #[error("{message}")]
    UniqueViolation { message: String },
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn malformed_query(message: impl Into<String>) -> Self {
        Self::MalformedQuery {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unique_violation(message: impl Into<String>) -> Self {
        Self::UniqueViolation {
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } | RepositoryError::Query { message } => {
                Error::internal(message)
            }
            RepositoryError::MalformedQuery { message } => Error::malformed_query(message),
            RepositoryError::NotFound { message } => Error::not_found(message),
            RepositoryError::UniqueViolation { message } => Error::conflict(message),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the repository error classification.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorKind;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorKind::Internal)]
    #[case(RepositoryError::query("boom"), ErrorKind::Internal)]
    #[case(RepositoryError::malformed_query("bad shape"), ErrorKind::MalformedQuery)]
    #[case(RepositoryError::not_found("user not found"), ErrorKind::NotFound)]
    #[case(
        RepositoryError::unique_violation("duplicate key"),
        ErrorKind::Conflict
    )]
    fn repository_errors_classify_uniformly(
        #[case] error: RepositoryError,
        #[case] expected: ErrorKind,
    ) {
        let mapped = Error::from(error);
        assert_eq!(mapped.kind(), expected);
    }

    #[test]
    fn not_found_message_is_passed_through_verbatim() {
        let mapped = Error::from(RepositoryError::not_found("order not found"));
        assert_eq!(mapped.message(), "order not found");
    }
}
