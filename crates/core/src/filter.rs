//! Filter-expression building for the remote search engine.
//!
//! Clients send filters as a JSON object mapping field names to values.
//! Each entry becomes one `field = value` expression and list values become
//! a single parenthesized OR-group. String values are quoted verbatim:
//! embedded single quotes are NOT escaped.

use std::collections::BTreeMap;

use serde_json::{Number, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A filter value the engine's filter syntax can express.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    String(String),
    Number(Number),
    Bool(bool),
    List(Vec<FilterValue>),
}

/// Field name to value, ordered by field name so the generated expression
/// list is identical across identical requests.
pub type FilterMap = BTreeMap<String, FilterValue>;

/// Result of parsing the raw `filters` parameter.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedFilters {
    pub filters: FilterMap,
    /// Fields whose value had no filter form (`null` or an object).
    pub skipped: Vec<String>,
}

impl FilterValue {
    /// Convert a JSON value.
    ///
    /// `null` and objects yield `None`. Unsupported list elements are
    /// dropped from the list rather than failing the whole value.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s)),
            Value::Number(n) => Some(Self::Number(n)),
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            Value::Null | Value::Object(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse the `filters` query parameter, which must be a JSON object.
pub fn parse_filters(raw: &str) -> Result<ParsedFilters, CoreError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("filters is not valid JSON: {e}")))?;

    let Value::Object(entries) = value else {
        return Err(CoreError::Validation(
            "filters must be a JSON object".to_string(),
        ));
    };

    let mut parsed = ParsedFilters::default();
    for (field, value) in entries {
        match FilterValue::from_json(value) {
            Some(v) => {
                parsed.filters.insert(field, v);
            }
            None => parsed.skipped.push(field),
        }
    }
    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Expression building
// ---------------------------------------------------------------------------

/// Build one filter expression per field.
///
/// Fields whose value renders to nothing (an empty list, or a list made
/// only of empty lists) contribute no expression.
pub fn build_filter_expressions(filters: &FilterMap) -> Vec<String> {
    filters
        .iter()
        .filter_map(|(field, value)| render(field, value))
        .collect()
}

fn render(field: &str, value: &FilterValue) -> Option<String> {
    match value {
        FilterValue::String(s) => Some(format!("{field} = '{s}'")),
        FilterValue::Number(n) => Some(format!("{field} = {}", format_number(n))),
        FilterValue::Bool(b) => Some(format!("{field} = {b}")),
        FilterValue::List(items) => {
            let conditions: Vec<String> =
                items.iter().filter_map(|item| render(field, item)).collect();
            if conditions.is_empty() {
                None
            } else {
                Some(format!("({})", conditions.join(" OR ")))
            }
        }
    }
}

/// Canonical decimal text: integers as-is, floats without exponent and
/// without trailing zeros (`3.0` renders as `3`).
fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn filters(value: Value) -> FilterMap {
        parse_filters(&value.to_string()).unwrap().filters
    }

    // -- build_filter_expressions -------------------------------------------

    #[test]
    fn string_values_are_single_quoted() {
        let exprs = build_filter_expressions(&filters(json!({"genre": "rock"})));
        assert_eq!(exprs, vec!["genre = 'rock'"]);
    }

    #[test]
    fn integers_render_as_decimal_text() {
        let exprs = build_filter_expressions(&filters(json!({"year": 2020, "delta": -5})));
        assert_eq!(exprs, vec!["delta = -5", "year = 2020"]);
    }

    #[test]
    fn floats_drop_trailing_zeros() {
        let exprs = build_filter_expressions(&filters(json!({"a": 2.50, "b": 3.0, "c": 0.125})));
        assert_eq!(exprs, vec!["a = 2.5", "b = 3", "c = 0.125"]);
    }

    #[test]
    fn large_floats_render_without_exponent() {
        let exprs = build_filter_expressions(&filters(json!({"big": 1.5e10})));
        assert_eq!(exprs, vec!["big = 15000000000"]);
    }

    #[test]
    fn booleans_render_as_literals() {
        let exprs = build_filter_expressions(&filters(json!({"a": true, "b": false})));
        assert_eq!(exprs, vec!["a = true", "b = false"]);
    }

    #[test]
    fn list_becomes_single_or_group() {
        let exprs =
            build_filter_expressions(&filters(json!({"genre": ["rock", "jazz", 7, true]})));
        assert_eq!(
            exprs,
            vec!["(genre = 'rock' OR genre = 'jazz' OR genre = 7 OR genre = true)"]
        );
    }

    #[test]
    fn single_element_list_is_still_parenthesized() {
        let exprs = build_filter_expressions(&filters(json!({"tag": ["new"]})));
        assert_eq!(exprs, vec!["(tag = 'new')"]);
    }

    #[test]
    fn empty_list_produces_no_expression() {
        let exprs = build_filter_expressions(&filters(json!({"tag": [], "year": 1999})));
        assert_eq!(exprs, vec!["year = 1999"]);
    }

    #[test]
    fn nested_list_renders_nested_group() {
        let exprs = build_filter_expressions(&filters(json!({"t": ["a", ["b", "c"]]})));
        assert_eq!(exprs, vec!["(t = 'a' OR (t = 'b' OR t = 'c'))"]);
    }

    #[test]
    fn expressions_are_ordered_by_field_name() {
        let exprs = build_filter_expressions(&filters(json!({"z": 1, "a": 2, "m": 3})));
        assert_eq!(exprs, vec!["a = 2", "m = 3", "z = 1"]);
    }

    #[test]
    fn embedded_quotes_are_passed_through_verbatim() {
        let exprs = build_filter_expressions(&filters(json!({"name": "o'brien"})));
        assert_eq!(exprs, vec!["name = 'o'brien'"]);
    }

    #[test]
    fn empty_map_produces_no_expressions() {
        assert!(build_filter_expressions(&FilterMap::new()).is_empty());
    }

    // -- parse_filters -------------------------------------------------------

    #[test]
    fn null_and_object_values_are_skipped() {
        let parsed =
            parse_filters(r#"{"a": null, "b": {"x": 1}, "c": "keep"}"#).unwrap();
        assert_eq!(parsed.skipped, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            build_filter_expressions(&parsed.filters),
            vec!["c = 'keep'"]
        );
    }

    #[test]
    fn unsupported_list_elements_are_dropped() {
        let exprs = build_filter_expressions(&filters(json!({"t": ["a", null, {"x": 1}]})));
        assert_eq!(exprs, vec!["(t = 'a')"]);
    }

    #[test]
    fn list_of_only_unsupported_elements_produces_nothing() {
        let exprs = build_filter_expressions(&filters(json!({"t": [null]})));
        assert!(exprs.is_empty());
    }

    #[test]
    fn invalid_json_is_a_validation_error() {
        assert_matches!(parse_filters("{not json"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_object_json_is_a_validation_error() {
        assert_matches!(
            parse_filters(r#"["genre", "rock"]"#),
            Err(CoreError::Validation(msg)) if msg.contains("JSON object")
        );
    }
}
