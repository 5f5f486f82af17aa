//! Path, query and body extractors for the player routes
//!
//! Query strings are kept as ordered pairs so duplicate keys survive until
//! filter translation; request bodies are narrowed to a [`PlayerInput`]
//! before they reach a handler.

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use crate::api::types::ApiError;
use crate::domain::PlayerError;
use crate::domain::players::{FilterParams, PlayerInput};

/// Validated player id from the `{id}` path segment.
///
/// Non-numeric and non-positive ids are rejected with `INVALID_ID`.
#[derive(Debug, Clone, Copy)]
pub struct PlayerPath {
    pub id: i64,
}

/// Parse a path id; anything but a positive integer is invalid
pub fn parse_player_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

impl<S> FromRequestParts<S> for PlayerPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        let id = parse_player_id(&raw).ok_or(ValidationRejection::Input(PlayerError::InvalidId))?;
        Ok(Self { id })
    }
}

/// Query string as ordered filter parameters
#[derive(Debug)]
pub struct FilterQuery(pub FilterParams);

impl Deref for FilterQuery {
    type Target = FilterParams;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for FilterQuery
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        Ok(Self(pairs.into_iter().collect()))
    }
}

/// JSON object body narrowed to player input
#[derive(Debug)]
pub struct PlayerBody(pub PlayerInput);

impl Deref for PlayerBody {
    type Target = PlayerInput;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for PlayerBody
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Map<String, Value>>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        let input = PlayerInput::from_json(&body).map_err(ValidationRejection::Input)?;
        Ok(Self(input))
    }
}

/// Extraction failure with structured error response
#[derive(Debug)]
pub enum ValidationRejection {
    /// Failed to parse path parameters
    Path(PathRejection),
    /// Failed to parse query string
    Query(QueryRejection),
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Parsed but rejected by the player rules
    Input(PlayerError),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Path(rejection) => (
                StatusCode::BAD_REQUEST,
                "PATH_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Query(rejection) => (
                StatusCode::BAD_REQUEST,
                "QUERY_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Json(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "BODY_TOO_LARGE",
                rejection.body_text(),
            ),
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                "JSON_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Input(err) => return ApiError::from(err).into_response(),
        };
        let error_type = if status == StatusCode::BAD_REQUEST {
            "bad_request"
        } else {
            "payload_too_large"
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
