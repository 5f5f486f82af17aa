//! Conjunctive predicate composition
//!
//! A [`Predicate`] is what the storage collaborator receives; it is
//! rendered by the backend and otherwise treated as opaque by the service.

use super::coercion::{FieldValue, coerce};
use super::error::PlayerError;
use super::filter::{FilterDescriptor, FilterOp, PlayerField};

/// Comparison applied by a single condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    /// Case-sensitive literal substring match
    Contains,
    Ge,
    Le,
    Gt,
    Lt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: PlayerField,
    pub comparison: Comparison,
    pub value: FieldValue,
}

/// Non-empty conjunction of conditions
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// Builds the AND of all descriptors, in order.
pub fn compose(descriptors: &[FilterDescriptor]) -> Result<Predicate, PlayerError> {
    if descriptors.is_empty() {
        return Err(PlayerError::EmptyFilterSet);
    }

    let conditions = descriptors
        .iter()
        .map(condition_for)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Predicate { conditions })
}

fn condition_for(d: &FilterDescriptor) -> Result<Condition, PlayerError> {
    let comparison = match d.op {
        FilterOp::Equals => Comparison::Eq,
        FilterOp::ContainsSubstring => Comparison::Contains,
        FilterOp::GreaterThan => Comparison::Ge,
        FilterOp::LessThan => Comparison::Le,
        FilterOp::AfterInstant => Comparison::Gt,
        FilterOp::BeforeInstant => Comparison::Lt,
    };

    // Substring matches always compare the raw text
    let value = match comparison {
        Comparison::Contains => FieldValue::Text(d.raw_value.clone()),
        _ => coerce(d.field.kind(), d.key, &d.raw_value)?,
    };

    Ok(Condition {
        field: d.field,
        comparison,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Race;
    use crate::domain::players::filter::{FilterParams, translate};

    fn descriptors(pairs: &[(&str, &str)]) -> Vec<FilterDescriptor> {
        let params: FilterParams = pairs.iter().copied().collect();
        translate(&params).unwrap()
    }

    #[test]
    fn test_empty_set_is_rejected() {
        assert!(matches!(compose(&[]), Err(PlayerError::EmptyFilterSet)));
    }

    #[test]
    fn test_composes_in_order() {
        let p = compose(&descriptors(&[
            ("race", "ELF"),
            ("name", "Al"),
            ("minExperience", "1000"),
            ("maxExperience", "1000"),
        ]))
        .unwrap();
        let c = p.conditions();
        assert_eq!(c.len(), 4);
        assert_eq!(c[0].comparison, Comparison::Eq);
        assert_eq!(c[0].value, FieldValue::Race(Race::Elf));
        assert_eq!(c[1].comparison, Comparison::Contains);
        assert_eq!(c[1].value, FieldValue::Text("Al".to_string()));
        assert_eq!(c[2].comparison, Comparison::Ge);
        assert_eq!(c[3].comparison, Comparison::Le);
        assert_eq!(c[3].value, FieldValue::Integer(1000));
    }

    #[test]
    fn test_instants_are_strict() {
        let p = compose(&descriptors(&[("after", "10"), ("before", "20")])).unwrap();
        assert_eq!(p.conditions()[0].comparison, Comparison::Gt);
        assert_eq!(p.conditions()[1].comparison, Comparison::Lt);
        assert_eq!(p.conditions()[0].field, PlayerField::Birthday);
    }

    #[test]
    fn test_coercion_failure_names_the_key() {
        let err = compose(&descriptors(&[("maxLevel", "ten")])).unwrap_err();
        assert!(matches!(
            err,
            PlayerError::InvalidValueFormat { field: "maxLevel", .. }
        ));
        let err = compose(&descriptors(&[("race", "elf")])).unwrap_err();
        assert!(matches!(err, PlayerError::InvalidValueFormat { field: "race", .. }));
    }

    #[test]
    fn test_banned_filter_is_permissive() {
        let p = compose(&descriptors(&[("banned", "nope")])).unwrap();
        assert_eq!(p.conditions()[0].value, FieldValue::Boolean(false));
    }
}
