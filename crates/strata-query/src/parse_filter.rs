use serde_json::Value;

use crate::filter::{Filter, FilterEntry, LogicalOp};
use crate::operator::Operator;
use crate::value::QueryValue;

/// Parse error for filter documents.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParseError(pub String);

impl std::fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "filter parse error: {}", self.0)
    }
}

impl std::error::Error for FilterParseError {}

/// Parse a JSON filter document into a `Filter` tree.
///
/// This is the validation layer in front of the compiler: everything the
/// compiler treats leniently (unknown fields, empty groups) passes through,
/// while structurally malformed input is rejected here.
///
/// Grammar:
/// - `{ "OR": [...] }` / `{ "AND": [...] }` are boolean groups; the value
///   must be an array of filter objects
/// - `{ "gt": v }`, `{ "eq": v }`, ... are operator entries; `in` takes an
///   array of scalars, every other operator takes a single scalar
/// - any other key names a field and descends into a nested filter object;
///   a `null` value drops the entry
///
/// Entry order follows the source document.
pub fn parse_filter(value: &Value) -> Result<Filter, FilterParseError> {
    let map = match value {
        Value::Object(map) => map,
        _ => return Err(FilterParseError("filter must be an object".into())),
    };

    let mut entries = Vec::new();
    for (key, value) in map {
        match key.as_str() {
            "OR" => entries.push(parse_group(LogicalOp::Or, key, value)?),
            "AND" => entries.push(parse_group(LogicalOp::And, key, value)?),
            k => {
                if let Some(op) = Operator::from_key(k) {
                    entries.push(parse_comparison(op, value)?);
                } else if value.is_null() {
                    // Absent constraint, dropped.
                } else if value.is_object() {
                    entries.push(FilterEntry::Field(k.to_string(), parse_filter(value)?));
                } else {
                    return Err(FilterParseError(format!(
                        "field {k} must carry a nested filter object"
                    )));
                }
            }
        }
    }

    Ok(Filter { entries })
}

fn parse_group(op: LogicalOp, key: &str, value: &Value) -> Result<FilterEntry, FilterParseError> {
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(FilterParseError(format!("{key} value must be an array"))),
    };

    let mut children = Vec::new();
    for item in items {
        children.push(parse_filter(item)?);
    }

    Ok(FilterEntry::Group(op, children))
}

fn parse_comparison(op: Operator, value: &Value) -> Result<FilterEntry, FilterParseError> {
    let comparand = match (op, value) {
        (Operator::In, Value::Array(items)) => {
            let mut values = Vec::new();
            for item in items {
                values.push(scalar(op, item)?);
            }
            QueryValue::List(values)
        }
        (Operator::In, _) => {
            return Err(FilterParseError("in comparand must be an array".into()));
        }
        (_, value) => scalar(op, value)?,
    };

    Ok(FilterEntry::Comparison(op, comparand))
}

fn scalar(op: Operator, value: &Value) -> Result<QueryValue, FilterParseError> {
    match value {
        Value::Object(_) | Value::Array(_) => Err(FilterParseError(format!(
            "{} comparand must be a scalar",
            op.key()
        ))),
        value => Ok(QueryValue::from_json(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_with_operator_map() {
        let filter = parse_filter(&json!({ "age": { "gt": 21 } })).unwrap();
        assert_eq!(filter.entries.len(), 1);
        match &filter.entries[0] {
            FilterEntry::Field(name, inner) => {
                assert_eq!(name, "age");
                assert_eq!(
                    inner.entries[0],
                    FilterEntry::Comparison(Operator::Gt, QueryValue::Int(21))
                );
            }
            other => panic!("expected Field, got {other:?}"),
        }
    }

    #[test]
    fn entries_keep_source_order() {
        let filter = parse_filter(&json!({
            "zeta": { "eq": 1 },
            "alpha": { "eq": 2 },
        }))
        .unwrap();
        let names: Vec<_> = filter
            .entries
            .iter()
            .map(|e| match e {
                FilterEntry::Field(name, _) => name.as_str(),
                other => panic!("expected Field, got {other:?}"),
            })
            .collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn or_group_with_two_branches() {
        let filter = parse_filter(&json!({
            "OR": [
                { "status": { "eq": "active" } },
                { "status": { "eq": "pending" } },
            ]
        }))
        .unwrap();
        match &filter.entries[0] {
            FilterEntry::Group(LogicalOp::Or, children) => assert_eq!(children.len(), 2),
            other => panic!("expected Group, got {other:?}"),
        }
    }

    #[test]
    fn and_group() {
        let filter = parse_filter(&json!({ "AND": [{ "a": { "eq": 1 } }] })).unwrap();
        assert!(matches!(
            &filter.entries[0],
            FilterEntry::Group(LogicalOp::And, children) if children.len() == 1
        ));
    }

    #[test]
    fn empty_group_parses() {
        // Empty groups are the compiler's problem (they compile to nothing),
        // not a parse error.
        let filter = parse_filter(&json!({ "OR": [] })).unwrap();
        assert!(matches!(
            &filter.entries[0],
            FilterEntry::Group(LogicalOp::Or, children) if children.is_empty()
        ));
    }

    #[test]
    fn group_value_must_be_an_array() {
        let err = parse_filter(&json!({ "OR": { "a": { "eq": 1 } } })).unwrap_err();
        assert!(err.0.contains("must be an array"), "{}", err.0);
    }

    #[test]
    fn group_members_must_be_objects() {
        let err = parse_filter(&json!({ "AND": ["oops"] })).unwrap_err();
        assert!(err.0.contains("must be an object"), "{}", err.0);
    }

    #[test]
    fn in_takes_an_array() {
        let filter = parse_filter(&json!({ "tags": { "in": [1, 2, 3] } })).unwrap();
        match &filter.entries[0] {
            FilterEntry::Field(_, inner) => assert_eq!(
                inner.entries[0],
                FilterEntry::Comparison(
                    Operator::In,
                    QueryValue::List(vec![
                        QueryValue::Int(1),
                        QueryValue::Int(2),
                        QueryValue::Int(3),
                    ])
                )
            ),
            other => panic!("expected Field, got {other:?}"),
        }
    }

    #[test]
    fn in_with_scalar_errors() {
        let err = parse_filter(&json!({ "tags": { "in": 1 } })).unwrap_err();
        assert!(err.0.contains("must be an array"), "{}", err.0);
    }

    #[test]
    fn scalar_operator_with_array_errors() {
        let err = parse_filter(&json!({ "age": { "gt": [1, 2] } })).unwrap_err();
        assert!(err.0.contains("must be a scalar"), "{}", err.0);
    }

    #[test]
    fn null_field_value_is_dropped() {
        let filter = parse_filter(&json!({ "profile": null, "age": { "eq": 1 } })).unwrap();
        assert_eq!(filter.entries.len(), 1);
        assert!(matches!(&filter.entries[0], FilterEntry::Field(name, _) if name == "age"));
    }

    #[test]
    fn bare_scalar_field_value_errors() {
        let err = parse_filter(&json!({ "age": 21 })).unwrap_err();
        assert!(err.0.contains("nested filter object"), "{}", err.0);
    }

    #[test]
    fn top_level_must_be_an_object() {
        let err = parse_filter(&json!([1, 2])).unwrap_err();
        assert!(err.0.contains("must be an object"), "{}", err.0);
    }

    #[test]
    fn empty_object_is_an_empty_filter() {
        let filter = parse_filter(&json!({})).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn nested_structured_fields() {
        let filter = parse_filter(&json!({
            "profile": { "address": { "city": { "eq": "Austin" } } }
        }))
        .unwrap();
        match &filter.entries[0] {
            FilterEntry::Field(name, inner) => {
                assert_eq!(name, "profile");
                assert!(matches!(
                    &inner.entries[0],
                    FilterEntry::Field(name, _) if name == "address"
                ));
            }
            other => panic!("expected Field, got {other:?}"),
        }
    }

    #[test]
    fn operator_alias_not_parses() {
        let filter = parse_filter(&json!({ "status": { "not": "archived" } })).unwrap();
        match &filter.entries[0] {
            FilterEntry::Field(_, inner) => assert!(matches!(
                inner.entries[0],
                FilterEntry::Comparison(Operator::Not, _)
            )),
            other => panic!("expected Field, got {other:?}"),
        }
    }
}
