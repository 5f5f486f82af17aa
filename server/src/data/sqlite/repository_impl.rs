//! PlayerRepository trait implementation for SQLite
//!
//! This module implements the PlayerRepository trait for Arc<SqliteService>,
//! delegating to the free functions in `repositories::player`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::PlayerRepository;
use crate::data::types::{NewPlayer, PageRequest, Player};
use crate::domain::players::Predicate;

use super::SqliteService;
use super::repositories::player;

#[async_trait]
impl PlayerRepository for Arc<SqliteService> {
    async fn find_page(
        &self,
        predicate: Option<&Predicate>,
        page: PageRequest,
    ) -> Result<Vec<Player>, DataError> {
        player::find_page(self.pool(), predicate, page)
            .await
            .map_err(Into::into)
    }

    async fn count(&self, predicate: Option<&Predicate>) -> Result<u64, DataError> {
        player::count_players(self.pool(), predicate)
            .await
            .map_err(Into::into)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DataError> {
        player::exists_by_id(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, DataError> {
        player::find_by_id(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn insert(&self, new_player: NewPlayer) -> Result<Player, DataError> {
        player::insert_player(self.pool(), new_player)
            .await
            .map_err(Into::into)
    }

    async fn update(&self, updated: Player) -> Result<Player, DataError> {
        player::update_player(self.pool(), updated)
            .await
            .map_err(Into::into)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DataError> {
        player::delete_player(self.pool(), id)
            .await
            .map_err(Into::into)
    }
}
