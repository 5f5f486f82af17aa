//! Domain logic for the player registry
//!
//! - `players` - filter translation, validation and the player query service

pub mod players;

pub use players::{PlayerError, PlayerService};
