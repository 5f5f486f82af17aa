//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display() {
        let err = SqliteError::Conflict("player 4 was modified concurrently".to_string());
        assert_eq!(
            err.to_string(),
            "Conflict: player 4 was modified concurrently"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let sqlite_err: SqliteError = io_err.into();
        assert!(sqlite_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_debug() {
        let err = SqliteError::Conflict("player 1".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Conflict"));
    }
}
