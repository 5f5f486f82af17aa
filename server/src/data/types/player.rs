//! Player record types shared between the domain and storage layers

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::{Profession, Race};

/// A stored player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    /// Milliseconds since the Unix epoch on the wire
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub birthday: DateTime<Utc>,
    pub banned: bool,
    pub experience: i64,
    pub level: i64,
    pub until_next_level: i64,
    /// Row version for optimistic concurrency
    #[serde(skip)]
    pub version: i64,
}

/// A player that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: DateTime<Utc>,
    pub banned: bool,
    pub experience: i64,
    pub level: i64,
    pub until_next_level: i64,
}

/// Sort key accepted by the `order` parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerSort {
    #[default]
    Id,
    Name,
    Experience,
    Birthday,
    Level,
}

impl PlayerSort {
    pub const ALL: [PlayerSort; 5] = [
        Self::Id,
        Self::Name,
        Self::Experience,
        Self::Birthday,
        Self::Level,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "NAME",
            Self::Experience => "EXPERIENCE",
            Self::Birthday => "BIRTHDAY",
            Self::Level => "LEVEL",
        }
    }

    /// Column the sort key orders by
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Experience => "experience",
            Self::Birthday => "birthday",
            Self::Level => "level",
        }
    }
}

/// One page of an ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
    pub sort: PlayerSort,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 3;

    pub fn offset(&self) -> i64 {
        i64::from(self.page_number).saturating_mul(i64::from(self.page_size))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
            sort: PlayerSort::Id,
        }
    }
}

impl fmt::Display for PlayerSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlayerSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| format!("unknown sort field: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Player {
        Player {
            id: 7,
            name: "Alvin".to_string(),
            title: "Keeper of the Gate".to_string(),
            race: Race::Dwarf,
            profession: Profession::Cleric,
            birthday: Utc.timestamp_millis_opt(1_000_000_000_000).unwrap(),
            banned: false,
            experience: 300,
            level: 2,
            until_next_level: 300,
            version: 4,
        }
    }

    #[test]
    fn test_player_serializes_camel_case_with_millis_birthday() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["untilNextLevel"], 300);
        assert_eq!(value["birthday"], 1_000_000_000_000i64);
        assert_eq!(value["race"], "DWARF");
        assert!(value.get("version").is_none());
        assert!(value.get("until_next_level").is_none());
    }

    #[test]
    fn test_sort_parses_member_names() {
        assert_eq!("LEVEL".parse::<PlayerSort>().unwrap(), PlayerSort::Level);
        assert_eq!(PlayerSort::Birthday.column(), "birthday");
        assert!("level".parse::<PlayerSort>().is_err());
        assert_eq!(PlayerSort::default(), PlayerSort::Id);
    }

    #[test]
    fn test_page_offset() {
        let page = PageRequest {
            page_number: 4,
            page_size: 25,
            sort: PlayerSort::Name,
        };
        assert_eq!(page.offset(), 100);
        assert_eq!(PageRequest::default().page_size, 3);
        assert_eq!(PageRequest::default().offset(), 0);
    }
}
