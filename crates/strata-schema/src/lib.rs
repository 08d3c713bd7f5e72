mod catalog;
mod field;

pub use catalog::FieldCatalog;
pub use field::{Field, FieldId};
