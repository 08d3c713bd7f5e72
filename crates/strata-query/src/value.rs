use serde_json::Value;

/// A comparand carried by a filter entry.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<QueryValue>),
}

impl QueryValue {
    pub fn from_json(value: &Value) -> QueryValue {
        match value {
            Value::Null => QueryValue::Null,
            Value::Bool(b) => QueryValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    QueryValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    QueryValue::Float(f)
                } else {
                    QueryValue::Null
                }
            }
            Value::String(s) => QueryValue::String(s.clone()),
            Value::Array(items) => {
                QueryValue::List(items.iter().map(QueryValue::from_json).collect())
            }
            Value::Object(_) => QueryValue::Null,
        }
    }

    /// Canonical text form, used only to derive parameter tokens. Lists are
    /// comma-joined; the bound value itself stays a list.
    pub fn encode(&self) -> String {
        match self {
            QueryValue::String(s) => s.clone(),
            QueryValue::Int(i) => i.to_string(),
            QueryValue::Float(f) => f.to_string(),
            QueryValue::Bool(b) => b.to_string(),
            QueryValue::Null => "null".to_string(),
            QueryValue::List(items) => items
                .iter()
                .map(QueryValue::encode)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, QueryValue::List(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_encode_to_their_text_form() {
        assert_eq!(QueryValue::String("abc".into()).encode(), "abc");
        assert_eq!(QueryValue::Int(-7).encode(), "-7");
        assert_eq!(QueryValue::Float(1.5).encode(), "1.5");
        assert_eq!(QueryValue::Bool(true).encode(), "true");
        assert_eq!(QueryValue::Null.encode(), "null");
    }

    #[test]
    fn lists_encode_comma_joined() {
        let list = QueryValue::List(vec![
            QueryValue::Int(1),
            QueryValue::Int(2),
            QueryValue::String("x".into()),
        ]);
        assert_eq!(list.encode(), "1,2,x");
    }

    #[test]
    fn from_json_prefers_integers() {
        assert_eq!(QueryValue::from_json(&json!(21)), QueryValue::Int(21));
        assert_eq!(QueryValue::from_json(&json!(2.25)), QueryValue::Float(2.25));
        assert_eq!(QueryValue::from_json(&json!(null)), QueryValue::Null);
    }

    #[test]
    fn from_json_maps_arrays_to_lists() {
        let value = QueryValue::from_json(&json!(["a", 1]));
        assert_eq!(
            value,
            QueryValue::List(vec![QueryValue::String("a".into()), QueryValue::Int(1)])
        );
    }
}
