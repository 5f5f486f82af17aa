//! Player query service
//!
//! Orchestrates paging, filter translation, predicate composition and input
//! validation, and delegates persistence to a [`PlayerRepository`].

use std::sync::Arc;

use super::error::PlayerError;
use super::filter::{FilterParams, translate};
use super::input::PlayerInput;
use super::predicate::{Predicate, compose};
use super::query::page_request;
use crate::data::traits::PlayerRepository;
use crate::data::types::Player;

pub struct PlayerService {
    repository: Arc<dyn PlayerRepository>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    /// One page of players matching the filter parameters
    pub async fn list(&self, params: &FilterParams) -> Result<Vec<Player>, PlayerError> {
        let page = page_request(params)?;
        let predicate = build_predicate(params)?;
        Ok(self.repository.find_page(predicate.as_ref(), page).await?)
    }

    /// Number of players matching the filter parameters; paging keys are
    /// ignored even when malformed
    pub async fn count(&self, params: &FilterParams) -> Result<u64, PlayerError> {
        let predicate = build_predicate(params)?;
        Ok(self.repository.count(predicate.as_ref()).await?)
    }

    pub async fn create(&self, input: &PlayerInput) -> Result<Player, PlayerError> {
        if input.is_empty() {
            return Err(PlayerError::EmptyInput);
        }
        input.ensure_no_nulls()?;
        let new_player = input.validate()?.into_new_player()?;
        Ok(self.repository.insert(new_player).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Player>, PlayerError> {
        if id < 1 {
            return Err(PlayerError::InvalidId);
        }
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Applies the supplied fields to an existing player.
    ///
    /// Empty input is a plain read. `None` means the player does not exist.
    pub async fn update(&self, id: i64, input: &PlayerInput) -> Result<Option<Player>, PlayerError> {
        if id <= 0 {
            return Err(PlayerError::InvalidId);
        }
        if input.is_empty() {
            return self.get_by_id(id).await;
        }

        let Some(mut player) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        input.validate()?.apply_to(&mut player);
        Ok(Some(self.repository.update(player).await?))
    }

    /// Returns `false` when there was nothing to delete
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, PlayerError> {
        if id < 1 {
            return Err(PlayerError::InvalidId);
        }
        if !self.repository.exists_by_id(id).await? {
            return Ok(false);
        }
        self.repository.delete_by_id(id).await?;
        Ok(true)
    }
}

/// No filters means an unconditional query
fn build_predicate(params: &FilterParams) -> Result<Option<Predicate>, PlayerError> {
    let descriptors = translate(params)?;
    if descriptors.is_empty() {
        return Ok(None);
    }
    compose(&descriptors).map(Some)
}
