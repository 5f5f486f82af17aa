//! Player domain errors

use thiserror::Error;

use crate::data::DataError;

/// Errors produced by the player query service
///
/// Every validation failure is raised before any state is touched; only
/// `ConcurrentModification` and `Storage` originate from the storage
/// collaborator.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Request body is empty")]
    EmptyInput,

    #[error("Field '{field}' must not be null")]
    NullField { field: &'static str },

    #[error("Name must be 1 to 12 characters and not blank")]
    InvalidName,

    #[error("Title must be 1 to 30 characters and not blank")]
    InvalidTitle,

    #[error("Birthday must not be before the Unix epoch")]
    InvalidBirthday,

    #[error("Experience must be between 0 and 10000000")]
    InvalidExperience,

    #[error("Id must be a positive integer")]
    InvalidId,

    #[error("It's impossible to create a filter for the field '{key}'")]
    UnsupportedFilterField { key: String },

    #[error("Invalid value '{value}' for '{field}'")]
    InvalidValueFormat { field: &'static str, value: String },

    #[error("Unknown sort field: {value}")]
    UnknownSortField { value: String },

    #[error("Filter set is empty")]
    EmptyFilterSet,

    #[error("Player was modified concurrently")]
    ConcurrentModification,

    #[error("Storage error: {0}")]
    Storage(DataError),
}

impl PlayerError {
    pub(crate) fn invalid_value(field: &'static str, value: &str) -> Self {
        Self::InvalidValueFormat {
            field,
            value: value.to_string(),
        }
    }
}

impl From<DataError> for PlayerError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::Conflict(_) => Self::ConcurrentModification,
            other => Self::Storage(other),
        }
    }
}
