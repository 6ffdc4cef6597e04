use tracing::warn;
use uuid::Uuid;

use crate::domain::{Page, PageKind, PagePatch, CURRENT_SCHEMA_VERSION};
use crate::errors::{LedgerError, Result};
use crate::storage::{page_warnings, JsonStorage, StorageBackend};

/// Facade coordinating page state and persistence.
///
/// Every mutating operation writes the affected page back to the backend
/// before returning, so a page the caller gets out of the store always
/// matches what is on disk at that moment.
pub struct LedgerStore {
    storage: Box<dyn StorageBackend>,
}

impl LedgerStore {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Opens a store over the default on-disk location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Box::new(JsonStorage::new_default()?)))
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Creates a page with the given title and kind and persists it.
    pub fn create_page(&self, title: &str, kind: PageKind) -> Result<Page> {
        let title = Page::validate_title(title)?;
        let page = Page::new(title, kind);
        self.storage.save_page(&page)?;
        Ok(page)
    }

    /// Loads a single page, rejecting documents written by a newer schema.
    pub fn get_page(&self, id: Uuid) -> Result<Page> {
        let page = self.storage.load_page(id)?;
        self.ensure_schema_support(&page)?;
        for warning in page_warnings(&page) {
            warn!("{}", warning);
        }
        Ok(page)
    }

    /// Returns every readable page, newest first. Pages from a newer schema
    /// are skipped rather than failing the whole listing.
    pub fn list_pages(&self) -> Result<Vec<Page>> {
        let mut pages = self.storage.list_pages()?;
        pages.retain(|page| match self.ensure_schema_support(page) {
            Ok(()) => true,
            Err(err) => {
                warn!("skipping page {}: {}", page.id, err);
                false
            }
        });
        Ok(pages)
    }

    /// Applies a partial update to the page's own fields and persists the
    /// result. A patch without any field present leaves storage untouched.
    pub fn update_page(&self, id: Uuid, patch: &PagePatch) -> Result<Page> {
        let mut page = self.get_page(id)?;
        if !patch.has_effect() {
            return Ok(page);
        }
        patch.apply_to(&mut page)?;
        self.storage.save_page(&page)?;
        Ok(page)
    }

    /// Deletes the page and, with it, every entry the page owns. Returns
    /// the removed page so callers can confirm what was dropped.
    pub fn delete_page(&self, id: Uuid) -> Result<Page> {
        let removed = self.storage.load_page(id)?;
        self.storage.delete_page(id)?;
        Ok(removed)
    }

    /// Writes a page that was mutated outside the store back to the backend.
    pub fn save_page(&self, page: &Page) -> Result<()> {
        self.storage.save_page(page)
    }

    fn ensure_schema_support(&self, page: &Page) -> Result<()> {
        if page.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "page schema v{} is newer than supported v{}",
                page.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn memory_store() -> LedgerStore {
        LedgerStore::new(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn created_pages_are_persisted_with_trimmed_titles() {
        let store = memory_store();
        let page = store.create_page("  January  ", PageKind::Deoya).unwrap();
        assert_eq!(page.title, "January");

        let loaded = store.get_page(page.id).unwrap();
        assert_eq!(loaded.title, "January");
        assert_eq!(loaded.kind, PageKind::Deoya);
    }

    #[test]
    fn blank_titles_are_rejected_before_anything_is_stored() {
        let store = memory_store();
        let err = store.create_page("   ", PageKind::Neoya).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(store.list_pages().unwrap().is_empty());
    }

    #[test]
    fn updating_an_unknown_page_reports_not_found() {
        let store = memory_store();
        let patch = PagePatch {
            title: Some("Renamed".into()),
            ..PagePatch::default()
        };
        assert!(matches!(
            store.update_page(Uuid::new_v4(), &patch),
            Err(LedgerError::PageNotFound(_))
        ));
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let store = memory_store();
        let page = store.create_page("January", PageKind::Deoya).unwrap();
        let before = store.get_page(page.id).unwrap();

        let updated = store.update_page(page.id, &PagePatch::default()).unwrap();
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.updated_at, before.updated_at);
    }

    #[test]
    fn deleting_a_page_takes_its_entries_with_it() {
        let store = memory_store();
        let mut page = store.create_page("January", PageKind::Deoya).unwrap();
        page.add_entry(
            crate::domain::EntryInput::new(1, 100)
                .into_entry()
                .unwrap(),
        );
        store.save_page(&page).unwrap();

        let removed = store.delete_page(page.id).unwrap();
        assert_eq!(removed.entry_count(), 1);
        assert!(matches!(
            store.get_page(page.id),
            Err(LedgerError::PageNotFound(_))
        ));
        assert!(matches!(
            store.delete_page(page.id),
            Err(LedgerError::PageNotFound(_))
        ));
    }

    #[test]
    fn rejects_future_schema_versions() {
        let store = memory_store();
        let mut page = store.create_page("Future", PageKind::Deoya).unwrap();
        page.schema_version = CURRENT_SCHEMA_VERSION + 5;
        store.save_page(&page).unwrap();

        let err = store.get_page(page.id).unwrap_err();
        match err {
            LedgerError::Storage(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}")
            }
            other => panic!("expected storage error, got {other:?}"),
        }
        assert!(store.list_pages().unwrap().is_empty());
    }
}
