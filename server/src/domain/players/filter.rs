//! Filter translation
//!
//! Maps request parameter names onto typed filter descriptors. The mapping
//! table fixes both the target field and the comparison operator for every
//! accepted key; anything outside the table is rejected.

use super::error::PlayerError;

/// Request keys that control paging and ordering rather than filtering
pub const PAGE_SIZE_KEY: &str = "pageSize";
pub const PAGE_NUMBER_KEY: &str = "pageNumber";
pub const ORDER_KEY: &str = "order";

const RESERVED_KEYS: [&str; 3] = [PAGE_SIZE_KEY, PAGE_NUMBER_KEY, ORDER_KEY];

/// Sentinel clients send for "no value"
pub const NULL_SENTINEL: &str = "null";

/// Comparison operator of a single filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    ContainsSubstring,
    /// Inclusive lower bound
    GreaterThan,
    /// Inclusive upper bound
    LessThan,
    AfterInstant,
    BeforeInstant,
}

/// Semantic type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Boolean,
    Race,
    Profession,
    Text,
    Instant,
}

/// Player attributes that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerField {
    Name,
    Title,
    Race,
    Profession,
    Banned,
    Birthday,
    Experience,
    Level,
}

impl PlayerField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Title => "title",
            Self::Race => "race",
            Self::Profession => "profession",
            Self::Banned => "banned",
            Self::Birthday => "birthday",
            Self::Experience => "experience",
            Self::Level => "level",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Name | Self::Title => FieldKind::Text,
            Self::Race => FieldKind::Race,
            Self::Profession => FieldKind::Profession,
            Self::Banned => FieldKind::Boolean,
            Self::Birthday => FieldKind::Instant,
            Self::Experience | Self::Level => FieldKind::Integer,
        }
    }
}

/// Accepted filter keys with their target field and operator
const FILTER_KEYS: [(&str, PlayerField, FilterOp); 11] = [
    ("name", PlayerField::Name, FilterOp::ContainsSubstring),
    ("title", PlayerField::Title, FilterOp::ContainsSubstring),
    ("race", PlayerField::Race, FilterOp::Equals),
    ("profession", PlayerField::Profession, FilterOp::Equals),
    ("banned", PlayerField::Banned, FilterOp::Equals),
    ("after", PlayerField::Birthday, FilterOp::AfterInstant),
    ("before", PlayerField::Birthday, FilterOp::BeforeInstant),
    ("minExperience", PlayerField::Experience, FilterOp::GreaterThan),
    ("maxExperience", PlayerField::Experience, FilterOp::LessThan),
    ("minLevel", PlayerField::Level, FilterOp::GreaterThan),
    ("maxLevel", PlayerField::Level, FilterOp::LessThan),
];

/// One field-level filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDescriptor {
    /// Request key the filter came from
    pub key: &'static str,
    pub field: PlayerField,
    pub op: FilterOp,
    pub raw_value: String,
}

/// Ordered request parameters
///
/// A `None` value is an absent parameter; the `"null"` sentinel is turned
/// into `None` on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    entries: Vec<(String, Option<String>)>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let value = (value != NULL_SENTINEL).then_some(value);
        self.entries.push((key.into(), value));
    }

    /// First value for `key`, if present and not absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// Translates request parameters into filter descriptors.
///
/// Paging and ordering keys are skipped, as are absent values (including an
/// unknown key whose value is absent). Output order follows input order.
pub fn translate(params: &FilterParams) -> Result<Vec<FilterDescriptor>, PlayerError> {
    let mut descriptors = Vec::new();

    for (key, value) in params.iter() {
        if RESERVED_KEYS.contains(&key) {
            continue;
        }
        let Some(value) = value else {
            continue;
        };

        let (name, field, op) = FILTER_KEYS
            .iter()
            .find(|(name, _, _)| *name == key)
            .copied()
            .ok_or_else(|| PlayerError::UnsupportedFilterField {
                key: key.to_string(),
            })?;

        descriptors.push(FilterDescriptor {
            key: name,
            field,
            op,
            raw_value: value.to_string(),
        });
    }

    Ok(descriptors)
}
