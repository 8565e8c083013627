//! Shared mapping from pool and Diesel failures to user directory errors.

use tracing::debug;

use crate::domain::ports::UserDirectoryError;

use super::pool::PoolError;

/// Map pool errors to directory connection errors.
pub(super) fn map_pool_error(error: PoolError) -> UserDirectoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserDirectoryError::connection(message)
        }
    }
}

/// Map Diesel errors to directory errors without leaking SQL text.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
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
        DieselError::NotFound => UserDirectoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserDirectoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserDirectoryError::connection("database connection error")
        }
        _ => UserDirectoryError::query("database error"),
    }
}
