//! Player classification enums
//!
//! Member names are part of the wire format and of the filter vocabulary
//! (`?race=ELF`), so parsing is exact and case-sensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// RACE
// ============================================================================

/// Player race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Race {
    Human,
    Dwarf,
    Elf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

impl Race {
    pub const ALL: [Race; 7] = [
        Self::Human,
        Self::Dwarf,
        Self::Elf,
        Self::Giant,
        Self::Orc,
        Self::Troll,
        Self::Hobbit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "HUMAN",
            Self::Dwarf => "DWARF",
            Self::Elf => "ELF",
            Self::Giant => "GIANT",
            Self::Orc => "ORC",
            Self::Troll => "TROLL",
            Self::Hobbit => "HOBBIT",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Race {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|race| race.as_str() == s)
            .ok_or_else(|| format!("unknown race: {}", s))
    }
}

// ============================================================================
// PROFESSION
// ============================================================================

/// Player profession
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Cleric,
    Paladin,
    Nazgul,
    Warlock,
    Druid,
}

impl Profession {
    pub const ALL: [Profession; 8] = [
        Self::Warrior,
        Self::Rogue,
        Self::Sorcerer,
        Self::Cleric,
        Self::Paladin,
        Self::Nazgul,
        Self::Warlock,
        Self::Druid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warrior => "WARRIOR",
            Self::Rogue => "ROGUE",
            Self::Sorcerer => "SORCERER",
            Self::Cleric => "CLERIC",
            Self::Paladin => "PALADIN",
            Self::Nazgul => "NAZGUL",
            Self::Warlock => "WARLOCK",
            Self::Druid => "DRUID",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Profession {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|profession| profession.as_str() == s)
            .ok_or_else(|| format!("unknown profession: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_round_trips_through_str() {
        for race in Race::ALL {
            assert_eq!(race.as_str().parse::<Race>().unwrap(), race);
        }
    }

    #[test]
    fn test_race_parse_is_case_sensitive() {
        assert!("elf".parse::<Race>().is_err());
        assert!("Elf".parse::<Race>().is_err());
        assert_eq!("ELF".parse::<Race>().unwrap(), Race::Elf);
    }

    #[test]
    fn test_profession_parse_rejects_unknown() {
        let err = "BARD".parse::<Profession>().unwrap_err();
        assert_eq!(err, "unknown profession: BARD");
    }

    #[test]
    fn test_serde_uses_member_names() {
        let json = serde_json::to_string(&Profession::Nazgul).unwrap();
        assert_eq!(json, r#""NAZGUL""#);
        let race: Race = serde_json::from_str(r#""HOBBIT""#).unwrap();
        assert_eq!(race, Race::Hobbit);
    }
}
