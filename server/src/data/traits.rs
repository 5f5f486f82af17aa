//! Repository traits for the storage backend
//!
//! The domain layer talks to storage only through [`PlayerRepository`], so
//! the query service never sees SQL or connection handling.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{NewPlayer, PageRequest, Player};
use crate::domain::players::Predicate;

// ============================================================================
// Player Repository Trait
// ============================================================================

/// Repository trait for player records
///
/// Implemented by the SQLite backend.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// One page of players matching `predicate` (all players when `None`)
    async fn find_page(
        &self,
        predicate: Option<&Predicate>,
        page: PageRequest,
    ) -> Result<Vec<Player>, DataError>;

    /// Number of players matching `predicate` (all players when `None`)
    async fn count(&self, predicate: Option<&Predicate>) -> Result<u64, DataError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, DataError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, DataError>;

    /// Persist a new player and return it with its assigned id
    async fn insert(&self, player: NewPlayer) -> Result<Player, DataError>;

    /// Persist changes to an existing player
    ///
    /// Fails with `DataError::Conflict` if the row changed (or vanished)
    /// since `player` was read.
    async fn update(&self, player: Player) -> Result<Player, DataError>;

    /// Remove a player; `DataError::Conflict` if no row was removed
    async fn delete_by_id(&self, id: i64) -> Result<(), DataError>;
}
