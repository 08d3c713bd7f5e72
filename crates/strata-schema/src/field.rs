use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a declared field. Document payloads are keyed by field id,
/// not field name, so ids are what end up in column path expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A declared field of a document type.
///
/// Fields form a forest: a field with `parent_field_id = None` sits at the
/// document root, others nest under their parent. `structured` marks a field
/// whose value is itself an object navigable by further field keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub parent_field_id: Option<FieldId>,
    #[serde(default)]
    pub structured: bool,
}

impl Field {
    /// A root-level field.
    pub fn root(id: impl Into<FieldId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_field_id: None,
            structured: false,
        }
    }

    /// A field nested under `parent`.
    pub fn child(
        id: impl Into<FieldId>,
        name: impl Into<String>,
        parent: impl Into<FieldId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_field_id: Some(parent.into()),
            structured: false,
        }
    }

    pub fn structured(mut self) -> Self {
        self.structured = true;
        self
    }
}
