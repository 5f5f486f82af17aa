//! Shared API types
//!
//! Error responses for every endpoint, plus the mapping from player
//! domain errors onto HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::PlayerError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn player_not_found(id: i64) -> Self {
        Self::not_found("PLAYER_NOT_FOUND", format!("Player {} not found", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PlayerError> for ApiError {
    fn from(e: PlayerError) -> Self {
        let message = e.to_string();
        match e {
            PlayerError::EmptyInput => Self::bad_request("EMPTY_INPUT", message),
            PlayerError::NullField { .. } => Self::bad_request("NULL_FIELD", message),
            PlayerError::InvalidName => Self::bad_request("INVALID_NAME", message),
            PlayerError::InvalidTitle => Self::bad_request("INVALID_TITLE", message),
            PlayerError::InvalidBirthday => Self::bad_request("INVALID_BIRTHDAY", message),
            PlayerError::InvalidExperience => Self::bad_request("INVALID_EXPERIENCE", message),
            PlayerError::InvalidId => Self::bad_request("INVALID_ID", message),
            PlayerError::UnsupportedFilterField { .. } => {
                Self::bad_request("UNSUPPORTED_FILTER", message)
            }
            PlayerError::InvalidValueFormat { .. } => Self::bad_request("INVALID_VALUE", message),
            PlayerError::UnknownSortField { .. } => Self::bad_request("UNKNOWN_SORT_FIELD", message),
            PlayerError::EmptyFilterSet => Self::bad_request("EMPTY_FILTER_SET", message),
            PlayerError::ConcurrentModification => {
                Self::conflict("CONCURRENT_MODIFICATION", message)
            }
            PlayerError::Storage(err) => {
                tracing::error!(error = %err, transient = err.is_transient(), "Data error");
                Self::internal("Database operation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, code, message) = match self {
            Self::BadRequest { code, message } => ("bad_request", code, message),
            Self::NotFound { code, message } => ("not_found", code, message),
            Self::Conflict { code, message } => ("conflict", code, message),
            Self::Internal { message } => ("internal_error", "INTERNAL".to_string(), message),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}
