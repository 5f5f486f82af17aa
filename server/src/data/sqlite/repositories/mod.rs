//! SQLite repositories
//!
//! Types (Player, NewPlayer, etc.) should be imported from `crate::data::types`.

pub mod player;

pub use player::{
    count_players, delete_player, exists_by_id, find_by_id, find_page, insert_player,
    update_player,
};
