//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! This module exposes a simplified API that frontends (CLI, GUI, HTTP
//! handlers) can rely on without depending on the entire service surface
//! area. Raw strings are parsed here; everything below works on typed
//! values.

use uuid::Uuid;

use crate::config::ConfigManager;
use crate::core::services::{LedgerOverview, PageTotals};
use crate::core::{EntryService, LedgerStore, SummaryService};
use crate::domain::{Entry, EntryInput, EntryPatch, Page, PageKind, PagePatch};
use crate::errors::{LedgerError, Result};

/// Creates a page after parsing the raw kind string.
pub fn api_create_page(store: &LedgerStore, title: &str, kind: &str) -> Result<Page> {
    let kind: PageKind = kind.parse()?;
    store.create_page(title, kind)
}

/// Creates a page of the configured default kind.
pub fn api_create_page_default(
    store: &LedgerStore,
    config: &ConfigManager,
    title: &str,
) -> Result<Page> {
    let kind = config.load()?.default_kind;
    store.create_page(title, kind)
}

/// Returns every readable page, newest first.
pub fn api_list_pages(store: &LedgerStore) -> Result<Vec<Page>> {
    store.list_pages()
}

/// Loads a single page with all of its entries.
pub fn api_get_page(store: &LedgerStore, id: Uuid) -> Result<Page> {
    store.get_page(id)
}

/// Loads a page and records it as the most recently opened one.
pub fn api_open_page(store: &LedgerStore, config: &ConfigManager, id: Uuid) -> Result<Page> {
    let page = store.get_page(id)?;
    let mut preferences = config.load()?;
    preferences.last_opened_page = Some(page.id);
    config.save(&preferences)?;
    Ok(page)
}

/// Returns the page recorded as last opened, if it still exists.
pub fn api_last_opened_page(store: &LedgerStore, config: &ConfigManager) -> Result<Option<Page>> {
    let preferences = config.load()?;
    match preferences.last_opened_page {
        Some(id) => match store.get_page(id) {
            Ok(page) => Ok(Some(page)),
            Err(LedgerError::PageNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        },
        None => Ok(None),
    }
}

/// Applies a partial update to a page's title or kind.
pub fn api_update_page(store: &LedgerStore, id: Uuid, patch: PagePatch) -> Result<Page> {
    store.update_page(id, &patch)
}

/// Deletes a page together with every entry it owns, returning the removed
/// page so callers can confirm what was dropped.
pub fn api_delete_page(store: &LedgerStore, id: Uuid) -> Result<Page> {
    store.delete_page(id)
}

/// Adds an entry to the page and returns the updated page.
pub fn api_add_entry(store: &LedgerStore, page_id: Uuid, input: EntryInput) -> Result<Page> {
    EntryService::add(store, page_id, input)
}

/// Patches a single entry of a page and returns the updated page.
pub fn api_update_entry(
    store: &LedgerStore,
    page_id: Uuid,
    entry_id: Uuid,
    patch: EntryPatch,
) -> Result<Page> {
    EntryService::update(store, page_id, entry_id, &patch)
}

/// Removes an entry from its page and returns the updated page.
pub fn api_remove_entry(store: &LedgerStore, page_id: Uuid, entry_id: Uuid) -> Result<Page> {
    EntryService::remove(store, page_id, entry_id)
}

/// Computes the money and interest totals of one page.
pub fn api_page_totals(store: &LedgerStore, id: Uuid) -> Result<PageTotals> {
    let page = store.get_page(id)?;
    Ok(SummaryService::page_totals(&page))
}

/// Computes the dashboard totals across every page, split by kind.
pub fn api_overview(store: &LedgerStore) -> Result<LedgerOverview> {
    let pages = store.list_pages()?;
    Ok(SummaryService::overview(&pages))
}

/// Sums the `money` column across every page of the given kind.
pub fn api_total_by_kind(store: &LedgerStore, kind: &str) -> Result<f64> {
    let kind: PageKind = kind.parse()?;
    let pages = store.list_pages()?;
    Ok(SummaryService::total_by_kind(&pages, kind))
}

/// Returns the entries of a page whose sequence number contains `query`.
pub fn api_search_entries(store: &LedgerStore, page_id: Uuid, query: &str) -> Result<Vec<Entry>> {
    let page = store.get_page(page_id)?;
    Ok(SummaryService::filter_by_number(&page, query)
        .into_iter()
        .cloned()
        .collect())
}
