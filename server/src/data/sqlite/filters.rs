//! Predicate to SQL rendering
//!
//! Column names come from the closed [`PlayerField`] set, never from client
//! input; every client value is bound as a parameter.
//!
//! [`PlayerField`]: crate::domain::players::PlayerField

use crate::domain::players::{Comparison, Condition, FieldValue, Predicate};

/// A bind value with its SQLite storage class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
}

impl From<&FieldValue> for SqlValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Integer(v) => Self::Integer(*v),
            FieldValue::Boolean(v) => Self::Integer(i64::from(*v)),
            FieldValue::Race(v) => Self::Text(v.as_str().to_string()),
            FieldValue::Profession(v) => Self::Text(v.as_str().to_string()),
            FieldValue::Text(v) => Self::Text(v.clone()),
            FieldValue::Instant(v) => Self::Integer(v.timestamp_millis()),
        }
    }
}

/// Positional parameters collected while rendering
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

/// Renders an optional predicate as a ` WHERE ...` suffix (empty for `None`)
pub fn where_clause(predicate: Option<&Predicate>, params: &mut SqlParams) -> String {
    match predicate {
        Some(p) => format!(" WHERE {}", render_predicate(p, params)),
        None => String::new(),
    }
}

/// Renders the conjunction with `?` placeholders and appends bind values
pub fn render_predicate(predicate: &Predicate, params: &mut SqlParams) -> String {
    predicate
        .conditions()
        .iter()
        .map(|c| render_condition(c, params))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn render_condition(condition: &Condition, params: &mut SqlParams) -> String {
    let column = condition.field.column();
    params.values.push(SqlValue::from(&condition.value));

    match condition.comparison {
        Comparison::Eq => format!("{} = ?", column),
        // instr() is case-sensitive and has no wildcard characters
        Comparison::Contains => format!("instr({}, ?) > 0", column),
        Comparison::Ge => format!("{} >= ?", column),
        Comparison::Le => format!("{} <= ?", column),
        Comparison::Gt => format!("{} > ?", column),
        Comparison::Lt => format!("{} < ?", column),
    }
}
