use serde::{Deserialize, Serialize};

use crate::operator::Operator;
use crate::value::QueryValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    And,
    Or,
}

/// One entry of a filter map, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEntry {
    /// `OR` / `AND` key carrying an ordered sequence of child filters.
    Group(LogicalOp, Vec<Filter>),
    /// Operator key comparing the value at the current path.
    Comparison(Operator, QueryValue),
    /// Field-name key descending into a nested filter.
    Field(String, Filter),
}

/// A parsed filter document. Entry order is the source map's insertion
/// order, which the compiler preserves in the emitted clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    pub entries: Vec<FilterEntry>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
