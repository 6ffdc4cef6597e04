pub mod common;
pub mod entry;
pub mod page;
pub mod value;

pub use common::{Identifiable, NamedEntity};
pub use entry::{Entry, EntryInput, EntryPatch};
pub use page::{Page, PageKind, PagePatch, CURRENT_SCHEMA_VERSION};
pub use value::{CoerceError, FieldValue};
