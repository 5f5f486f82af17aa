//! Player registry core
//!
//! - `filter` - request parameter to filter descriptor translation
//! - `coercion` - raw string to typed value conversion
//! - `predicate` - conjunctive predicate composition
//! - `level` - level derivation from experience
//! - `input` - create/update body validation
//! - `query` - paging and ordering parameters
//! - `service` - the query service tying it together

pub mod coercion;
pub mod error;
pub mod filter;
pub mod input;
pub mod level;
pub mod predicate;
pub mod query;
pub mod service;

pub use coercion::{FieldValue, coerce};
pub use error::PlayerError;
pub use filter::{FieldKind, FilterDescriptor, FilterOp, FilterParams, PlayerField, translate};
pub use input::{InputField, PlayerInput, PlayerPatch};
pub use level::{LevelProgress, MAX_EXPERIENCE, progress_for};
pub use predicate::{Comparison, Condition, Predicate, compose};
pub use query::page_request;
pub use service::PlayerService;
