//! Shared data types for the player registry
//!
//! Used by the domain layer and the storage backend alike so both agree on
//! the shape of a player row.

mod enums;
mod player;

pub use enums::{Profession, Race};
pub use player::{NewPlayer, PageRequest, Player, PlayerSort};
