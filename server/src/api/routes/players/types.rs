//! Player API types
//!
//! Bodies and query strings are parsed loosely by the extractors; these
//! types only describe the accepted shape in the OpenAPI document.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::data::types::{Profession, Race};

/// Request body for creating or updating a player.
///
/// Every field is optional on update. `level` and `untilNextLevel` are
/// derived from `experience` and ignored if sent.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    /// 1 to 12 characters, not blank
    pub name: Option<String>,
    /// 1 to 30 characters, not blank
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// Milliseconds since the Unix epoch, not negative
    pub birthday: Option<i64>,
    /// Defaults to false on create
    pub banned: Option<bool>,
    /// 0 to 10000000
    pub experience: Option<i64>,
}

/// Filter and paging parameters for listing and counting players
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PlayerListQuery {
    /// Case-sensitive substring of the name
    pub name: Option<String>,
    /// Case-sensitive substring of the title
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// Birthday strictly after, in epoch milliseconds
    pub after: Option<i64>,
    /// Birthday strictly before, in epoch milliseconds
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i64>,
    pub max_experience: Option<i64>,
    pub min_level: Option<i64>,
    pub max_level: Option<i64>,
    /// Ignored by count. Defaults to 0
    pub page_number: Option<u32>,
    /// Ignored by count. Defaults to 3
    pub page_size: Option<u32>,
    /// ID, NAME, EXPERIENCE, BIRTHDAY or LEVEL. Ignored by count
    pub order: Option<String>,
}
