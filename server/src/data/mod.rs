//! Data storage layer
//!
//! - `sqlite` - Embedded player store (schema, predicate rendering, queries)
//! - `types` - Player records and paging types shared with the domain
//! - `traits` - Repository trait the domain depends on
//! - `error` - Backend-neutral error type

pub mod error;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use sqlite::SqliteService;
pub use traits::PlayerRepository;
