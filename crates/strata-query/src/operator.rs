use serde::{Deserialize, Serialize};

/// Comparison operators accepted in filter documents.
///
/// Each maps to exactly one SQL comparison symbol. `Not` is an alias of
/// `Neq` kept for wire compatibility; `Id` matches one element of a
/// comma-delimited identifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Neq,
    In,
    Contains,
    Not,
    Id,
}

impl Operator {
    /// Recognize a filter-map key as an operator. Unknown keys return `None`
    /// and are treated as field names by the parser.
    pub fn from_key(key: &str) -> Option<Operator> {
        match key {
            "gt" => Some(Operator::Gt),
            "gte" => Some(Operator::Gte),
            "lt" => Some(Operator::Lt),
            "lte" => Some(Operator::Lte),
            "eq" => Some(Operator::Eq),
            "neq" => Some(Operator::Neq),
            "in" => Some(Operator::In),
            "contains" => Some(Operator::Contains),
            "not" => Some(Operator::Not),
            "id" => Some(Operator::Id),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::In => "in",
            Operator::Contains => "contains",
            Operator::Not => "not",
            Operator::Id => "id",
        }
    }

    /// The SQL comparison symbol this operator compiles to.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Eq => "=",
            Operator::Neq | Operator::Not => "!=",
            Operator::In => "IN",
            Operator::Contains => "LIKE",
            Operator::Id => "SIMILAR TO",
        }
    }
}
