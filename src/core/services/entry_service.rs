//! Business logic helpers for managing the entries of a page.

use uuid::Uuid;

use crate::core::store::LedgerStore;
use crate::domain::{Entry, EntryInput, EntryPatch, Page};
use crate::errors::{LedgerError, Result};

/// Validated entry mutations. Each operation loads the owning page, applies
/// the change and writes the whole page back, so entries never change on
/// disk without their page's `updated_at` moving with them. Every mutation
/// returns the updated page, entries included.
pub struct EntryService;

impl EntryService {
    /// Coerces the input, appends a new entry and writes the page back.
    pub fn add(store: &LedgerStore, page_id: Uuid, input: EntryInput) -> Result<Page> {
        let mut page = store.get_page(page_id)?;
        let entry = input.into_entry()?;
        page.add_entry(entry);
        store.save_page(&page)?;
        Ok(page)
    }

    /// Overwrites the present patch fields on the entry identified by
    /// `entry_id`. A patch without any field present leaves storage
    /// untouched, but the entry must exist either way.
    pub fn update(
        store: &LedgerStore,
        page_id: Uuid,
        entry_id: Uuid,
        patch: &EntryPatch,
    ) -> Result<Page> {
        let mut page = store.get_page(page_id)?;
        let entry = page
            .entry_mut(entry_id)
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        if patch.has_effect() {
            patch.apply_to(entry)?;
            page.touch();
            store.save_page(&page)?;
        }
        Ok(page)
    }

    /// Removes the entry identified by `entry_id` from the page.
    pub fn remove(store: &LedgerStore, page_id: Uuid, entry_id: Uuid) -> Result<Page> {
        let mut page = store.get_page(page_id)?;
        page.remove_entry(entry_id)
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        store.save_page(&page)?;
        Ok(page)
    }

    /// Returns a snapshot of the page's entries in insertion order.
    pub fn list(page: &Page) -> Vec<&Entry> {
        page.entries.iter().collect()
    }
}
