//! Shared mapping from Diesel and pool failures to [`RepositoryError`].
//!
//! This is the single place where database error kinds are classified; the
//! repositories never inspect `diesel::result::Error` themselves. The
//! original error is logged here before its message is forwarded, so the
//! classification decision stays observable.

use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RepositoryError::connection(message)
}

/// Classify a Diesel error.
///
/// Unique violations and not-found become client errors; query-builder and
/// serialisation failures are malformed queries; everything else, foreign
/// key violations included, stays an unclassified query failure.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::not_found("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::unique_violation(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(err) => {
            RepositoryError::malformed_query(err.to_string())
        }
        DieselError::SerializationError(err) | DieselError::DeserializationError(err) => {
            RepositoryError::malformed_query(err.to_string())
        }
        DieselError::DatabaseError(_, info) => RepositoryError::query(info.message().to_owned()),
        _ => RepositoryError::query("database error"),
    }
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        map_diesel_error(error)
    }
}
