use std::collections::HashMap;

use strata_query::QueryValue;

/// Allocates named-parameter tokens for one compilation.
///
/// Tokens are derived from the bound value (hex of `key:<canonical text>`),
/// so they are deterministic across runs and transport-safe. Binding the
/// same value twice reuses its slot; distinct values whose canonical text
/// collides get a numeric suffix instead of sharing a slot.
#[derive(Debug, Clone, Default)]
pub struct Params {
    slots: Vec<(String, QueryValue)>,
    by_token: HashMap<String, usize>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value and return its placeholder token.
    pub fn bind(&mut self, value: QueryValue) -> String {
        let base = hex::encode(format!("key:{}", value.encode()));
        let mut token = base.clone();
        let mut bump = 0usize;
        loop {
            match self.by_token.get(&token) {
                None => {
                    self.by_token.insert(token.clone(), self.slots.len());
                    self.slots.push((token.clone(), value));
                    return token;
                }
                Some(&slot) if self.slots[slot].1 == value => return token,
                Some(_) => {
                    bump += 1;
                    token = format!("{base}_{bump}");
                }
            }
        }
    }

    /// Placeholder text for a token. List bindings expand variadically
    /// inside an `IN (...)` fragment.
    pub fn placeholder(token: &str, list: bool) -> String {
        if list {
            format!("(:...{token})")
        } else {
            format!(":{token}")
        }
    }

    /// Bound parameters in first-bind order.
    pub fn into_values(self) -> Vec<(String, QueryValue)> {
        self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
