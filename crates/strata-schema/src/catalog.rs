use std::collections::HashMap;

use crate::field::{Field, FieldId};

/// Lookup index over the declared fields of one document type.
///
/// Built once from the flat field list and keyed by `(parent, name)`, so a
/// name is resolved against the nesting level it appears at. Two fields may
/// share a name as long as they hang under different parents; the schema
/// service guarantees `(parent, name)` uniqueness, and on duplicate input
/// the last record wins.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    by_parent_name: HashMap<(Option<FieldId>, String), Field>,
}

impl FieldCatalog {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut by_parent_name = HashMap::new();
        for field in fields {
            by_parent_name.insert((field.parent_field_id.clone(), field.name.clone()), field);
        }
        Self { by_parent_name }
    }

    /// Find the field called `name` directly under `parent` (`None` = the
    /// document root).
    pub fn resolve(&self, parent: Option<&FieldId>, name: &str) -> Option<&Field> {
        self.by_parent_name
            .get(&(parent.cloned(), name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_parent_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_parent_name.is_empty()
    }
}
