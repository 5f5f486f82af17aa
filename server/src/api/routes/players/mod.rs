//! Player API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{FilterQuery, PlayerBody, PlayerPath};
use crate::api::types::ApiError;
use crate::data::types::Player;
use crate::domain::PlayerService;

use types::{PlayerListQuery, PlayerRequest};

/// Shared state for Player API endpoints
#[derive(Clone)]
pub struct PlayersApiState {
    pub players: Arc<PlayerService>,
}

/// Build Player API routes
pub fn routes(players: Arc<PlayerService>) -> Router<()> {
    let state = PlayersApiState { players };

    Router::new()
        .route("/", get(list_players).post(create_player))
        .route("/count", get(count_players))
        .route(
            "/{id}",
            get(get_player).post(update_player).delete(delete_player),
        )
        .with_state(state)
}

/// List one page of players matching the filters
#[utoipa::path(
    get,
    path = "/rest/players",
    tag = "players",
    params(PlayerListQuery),
    responses(
        (status = 200, description = "Matching players", body = Vec<Player>),
        (status = 400, description = "Unknown filter key or malformed value")
    )
)]
pub async fn list_players(
    State(state): State<PlayersApiState>,
    query: FilterQuery,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state.players.list(&query).await?;
    Ok(Json(players))
}

/// Count players matching the filters
#[utoipa::path(
    get,
    path = "/rest/players/count",
    tag = "players",
    params(PlayerListQuery),
    responses(
        (status = 200, description = "Number of matching players", body = u64),
        (status = 400, description = "Unknown filter key or malformed value")
    )
)]
pub async fn count_players(
    State(state): State<PlayersApiState>,
    query: FilterQuery,
) -> Result<Json<u64>, ApiError> {
    let count = state.players.count(&query).await?;
    Ok(Json(count))
}

/// Create a player
#[utoipa::path(
    post,
    path = "/rest/players",
    tag = "players",
    request_body = PlayerRequest,
    responses(
        (status = 200, description = "Player created", body = Player),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn create_player(
    State(state): State<PlayersApiState>,
    body: PlayerBody,
) -> Result<Json<Player>, ApiError> {
    let player = state.players.create(&body).await?;
    tracing::debug!(id = player.id, "Player created");
    Ok(Json(player))
}

/// Get a player by id
#[utoipa::path(
    get,
    path = "/rest/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player id")),
    responses(
        (status = 200, description = "Player found", body = Player),
        (status = 400, description = "Id is not a positive integer"),
        (status = 404, description = "Player not found")
    )
)]
pub async fn get_player(
    State(state): State<PlayersApiState>,
    path: PlayerPath,
) -> Result<Json<Player>, ApiError> {
    state
        .players
        .get_by_id(path.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::player_not_found(path.id))
}

/// Update a player; only the supplied fields change
#[utoipa::path(
    post,
    path = "/rest/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player id")),
    request_body = PlayerRequest,
    responses(
        (status = 200, description = "Player updated", body = Player),
        (status = 400, description = "Invalid id or fields"),
        (status = 404, description = "Player not found"),
        (status = 409, description = "Player was modified concurrently")
    )
)]
pub async fn update_player(
    State(state): State<PlayersApiState>,
    path: PlayerPath,
    body: PlayerBody,
) -> Result<Json<Player>, ApiError> {
    state
        .players
        .update(path.id, &body)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::player_not_found(path.id))
}

/// Delete a player
#[utoipa::path(
    delete,
    path = "/rest/players/{id}",
    tag = "players",
    params(("id" = i64, Path, description = "Player id")),
    responses(
        (status = 200, description = "Player deleted"),
        (status = 400, description = "Id is not a positive integer"),
        (status = 404, description = "Player not found")
    )
)]
pub async fn delete_player(
    State(state): State<PlayersApiState>,
    path: PlayerPath,
) -> Result<StatusCode, ApiError> {
    if !state.players.delete_by_id(path.id).await? {
        return Err(ApiError::player_not_found(path.id));
    }
    tracing::debug!(id = path.id, "Player deleted");
    Ok(StatusCode::OK)
}
