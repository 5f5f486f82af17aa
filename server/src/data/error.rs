//! Unified error type for data layer
//!
//! Backend-specific errors are converted into [`DataError`] so callers above
//! the storage layer never match on driver types.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Conflict error (row changed or vanished underneath a write)
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl DataError {
    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

/// Convert from the SqliteError type
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::Io(e) => Self::Io(e),
            crate::data::sqlite::SqliteError::Conflict(msg) => Self::Conflict(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteError;

    #[test]
    fn test_conflict_conversion() {
        let err: DataError = SqliteError::Conflict("player 3".to_string()).into();
        assert!(matches!(err, DataError::Conflict(msg) if msg == "player 3"));
    }

    #[test]
    fn test_database_conversion() {
        let err: DataError = SqliteError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, DataError::Sqlite(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_conflict_is_not_transient() {
        assert!(!DataError::Conflict("x".to_string()).is_transient());
    }
}
