//! Shared Diesel error mapping for the storage adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool error through a repository's connection constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel errors into query or connection constructors.
///
/// Unique violations are not handled here; adapters with a uniqueness
/// contract check for them before falling back to this helper.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
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
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Whether `error` is a unique constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(DieselError::RollbackTransaction, Mapped::Query("database error"))]
    fn diesel_errors_map_to_query(#[case] error: DieselError, #[case] expected: Mapped) {
        let mapped = map_basic_diesel_error(error, Mapped::Query, |m| {
            Mapped::Connection(m.to_owned())
        });
        assert_eq!(mapped, expected);
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
