//! Create/update input handling
//!
//! Request bodies arrive as loose JSON objects. They are narrowed into a
//! [`PlayerInput`] (three states per field) and then validated into a
//! [`PlayerPatch`] before anything is mutated.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use super::coercion::parse_integer;
use super::error::PlayerError;
use super::filter::NULL_SENTINEL;
use super::level::{MAX_EXPERIENCE, progress_for};
use crate::data::types::{NewPlayer, Player, Profession, Race};

const MAX_NAME_CHARS: usize = 12;
const MAX_TITLE_CHARS: usize = 30;

/// State of a single input field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputField {
    #[default]
    Absent,
    /// Explicit JSON `null`
    Null,
    Value(String),
}

impl InputField {
    fn from_json(field: &'static str, value: Option<&Value>) -> Result<Self, PlayerError> {
        match value {
            None => Ok(Self::Absent),
            Some(Value::Null) => Ok(Self::Null),
            Some(Value::String(s)) if s == NULL_SENTINEL => Ok(Self::Absent),
            Some(Value::String(s)) => Ok(Self::Value(s.clone())),
            Some(Value::Number(n)) => Ok(Self::Value(n.to_string())),
            Some(Value::Bool(b)) => Ok(Self::Value(b.to_string())),
            Some(other) => Err(PlayerError::invalid_value(field, &other.to_string())),
        }
    }

    fn value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }
}

/// Client-settable player attributes as received
///
/// `level` and `untilNextLevel` are derived and never read from input;
/// unrecognized keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub name: InputField,
    pub title: InputField,
    pub race: InputField,
    pub profession: InputField,
    pub birthday: InputField,
    pub banned: InputField,
    pub experience: InputField,
}

impl PlayerInput {
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, PlayerError> {
        let field = |name: &'static str| InputField::from_json(name, body.get(name));
        Ok(Self {
            name: field("name")?,
            title: field("title")?,
            race: field("race")?,
            profession: field("profession")?,
            birthday: field("birthday")?,
            banned: field("banned")?,
            experience: field("experience")?,
        })
    }

    fn fields(&self) -> [(&'static str, &InputField); 7] {
        [
            ("name", &self.name),
            ("title", &self.title),
            ("race", &self.race),
            ("profession", &self.profession),
            ("birthday", &self.birthday),
            ("banned", &self.banned),
            ("experience", &self.experience),
        ]
    }

    /// True when no settable field was supplied
    pub fn is_empty(&self) -> bool {
        self.fields()
            .iter()
            .all(|(_, f)| matches!(f, InputField::Absent))
    }

    /// Rejects explicit nulls; `banned` may be null.
    pub fn ensure_no_nulls(&self) -> Result<(), PlayerError> {
        match self
            .fields()
            .into_iter()
            .find(|(name, f)| *name != "banned" && matches!(f, InputField::Null))
        {
            Some((field, _)) => Err(PlayerError::NullField { field }),
            None => Ok(()),
        }
    }

    /// Checks the format and range of every supplied value.
    pub fn validate(&self) -> Result<PlayerPatch, PlayerError> {
        let name = self
            .name
            .value()
            .map(|v| bounded_text(v, MAX_NAME_CHARS).ok_or(PlayerError::InvalidName))
            .transpose()?;

        let title = self
            .title
            .value()
            .map(|v| bounded_text(v, MAX_TITLE_CHARS).ok_or(PlayerError::InvalidTitle))
            .transpose()?;

        let race = self
            .race
            .value()
            .map(|v| v.parse::<Race>().map_err(|_| PlayerError::invalid_value("race", v)))
            .transpose()?;

        let profession = self
            .profession
            .value()
            .map(|v| {
                v.parse::<Profession>()
                    .map_err(|_| PlayerError::invalid_value("profession", v))
            })
            .transpose()?;

        let birthday = self.birthday.value().map(birthday).transpose()?;

        let banned = self.banned.value().map(|v| v == "true");

        let experience = self.experience.value().map(experience).transpose()?;

        Ok(PlayerPatch {
            name,
            title,
            race,
            profession,
            birthday,
            banned,
            experience,
        })
    }
}

fn bounded_text(value: &str, max_chars: usize) -> Option<String> {
    let valid = !value.trim().is_empty() && value.chars().count() <= max_chars;
    valid.then(|| value.to_string())
}

fn birthday(raw: &str) -> Result<DateTime<Utc>, PlayerError> {
    let millis = parse_integer("birthday", raw)?;
    if millis < 0 {
        return Err(PlayerError::InvalidBirthday);
    }
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| PlayerError::invalid_value("birthday", raw))
}

fn experience(raw: &str) -> Result<i64, PlayerError> {
    let value = parse_integer("experience", raw)?;
    if !(0..=MAX_EXPERIENCE).contains(&value) {
        return Err(PlayerError::InvalidExperience);
    }
    Ok(value)
}

/// Validated set of changes to a player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub birthday: Option<DateTime<Utc>>,
    pub banned: Option<bool>,
    pub experience: Option<i64>,
}

impl PlayerPatch {
    /// Builds a new player; every field except `banned` is required.
    pub fn into_new_player(self) -> Result<NewPlayer, PlayerError> {
        let name = self.name.ok_or(PlayerError::NullField { field: "name" })?;
        let title = self.title.ok_or(PlayerError::NullField { field: "title" })?;
        let race = self.race.ok_or(PlayerError::NullField { field: "race" })?;
        let profession = self
            .profession
            .ok_or(PlayerError::NullField { field: "profession" })?;
        let birthday = self
            .birthday
            .ok_or(PlayerError::NullField { field: "birthday" })?;
        let experience = self
            .experience
            .ok_or(PlayerError::NullField { field: "experience" })?;

        let progress = progress_for(experience);
        Ok(NewPlayer {
            name,
            title,
            race,
            profession,
            birthday,
            banned: self.banned.unwrap_or(false),
            experience,
            level: progress.level,
            until_next_level: progress.until_next_level,
        })
    }

    /// Overwrites the supplied fields and re-derives level from experience.
    pub fn apply_to(self, player: &mut Player) {
        if let Some(name) = self.name {
            player.name = name;
        }
        if let Some(title) = self.title {
            player.title = title;
        }
        if let Some(race) = self.race {
            player.race = race;
        }
        if let Some(profession) = self.profession {
            player.profession = profession;
        }
        if let Some(birthday) = self.birthday {
            player.birthday = birthday;
        }
        if let Some(banned) = self.banned {
            player.banned = banned;
        }
        if let Some(experience) = self.experience {
            let progress = progress_for(experience);
            player.experience = experience;
            player.level = progress.level;
            player.until_next_level = progress.until_next_level;
        }
    }
}
