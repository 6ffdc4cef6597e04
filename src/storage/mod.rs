pub mod json_backend;
pub mod memory;

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::{Page, PageKind};
use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing pages.
///
/// A page is saved and loaded as one document, entries included. Backends
/// never merge concurrent writes; the last save of a page wins.
pub trait StorageBackend: Send + Sync {
    fn save_page(&self, page: &Page) -> Result<()>;
    fn load_page(&self, id: Uuid) -> Result<Page>;
    fn list_pages(&self) -> Result<Vec<Page>>;
    fn delete_page(&self, id: Uuid) -> Result<()>;
}

/// Detects anomalies within a page snapshot, typically after loading a file
/// that was edited or produced outside this crate.
pub fn page_warnings(page: &Page) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen: HashSet<Uuid> = HashSet::new();

    for entry in &page.entries {
        if !seen.insert(entry.id) {
            warnings.push(format!(
                "page {} contains duplicate entry id {}",
                page.id, entry.id
            ));
        }
        if !entry.money.is_finite() {
            warnings.push(format!("entry {} has a non-finite money amount", entry.id));
        }
        if !entry.interest.is_finite() {
            warnings.push(format!(
                "entry {} has a non-finite interest amount",
                entry.id
            ));
        }
        if page.kind == PageKind::Deoya && entry.interest != 0.0 {
            warnings.push(format!(
                "entry {} records interest on a deoya page",
                entry.id
            ));
        }
    }
    if page.updated_at < page.created_at {
        warnings.push(format!(
            "page {} was updated before it was created",
            page.id
        ));
    }
    warnings
}

pub use json_backend::{load_page_from_path, save_page_to_path, JsonStorage};
pub use memory::MemoryStorage;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryInput, PageKind};

    #[test]
    fn clean_pages_produce_no_warnings() {
        let mut page = Page::new("January", PageKind::Deoya);
        page.add_entry(EntryInput::new(1, 100).into_entry().unwrap());
        assert!(page_warnings(&page).is_empty());
    }

    #[test]
    fn duplicate_and_non_finite_entries_are_reported() {
        let mut page = Page::new("January", PageKind::Deoya);
        let mut entry = EntryInput::new(1, 100).into_entry().unwrap();
        entry.money = f64::INFINITY;
        let twin = entry.clone();
        page.add_entry(entry);
        page.add_entry(twin);

        let warnings = page_warnings(&page);
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("duplicate entry id")));
        assert!(warnings.iter().any(|w| w.contains("non-finite money")));
    }

    #[test]
    fn interest_on_a_deoya_page_is_flagged() {
        let mut page = Page::new("January", PageKind::Deoya);
        page.add_entry(
            EntryInput::new(1, 100)
                .with_interest(5)
                .into_entry()
                .unwrap(),
        );

        let warnings = page_warnings(&page);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("interest on a deoya page"));

        page.kind = PageKind::Neoya;
        assert!(page_warnings(&page).is_empty());
    }
}
