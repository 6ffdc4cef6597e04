use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::{Identifiable, Page};
use crate::errors::LedgerError;

use super::{Result, StorageBackend};

/// Volatile backend holding pages in a map. Useful for tests and sessions
/// that should not leave anything on disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pages: Mutex<HashMap<Uuid, Page>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_pages(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Page>>> {
        self.pages
            .lock()
            .map_err(|_| LedgerError::Storage("page cache poisoned".to_string()))
    }
}

impl StorageBackend for MemoryStorage {
    fn save_page(&self, page: &Page) -> Result<()> {
        let mut pages = self.lock_pages()?;
        pages.insert(page.id(), page.clone());
        Ok(())
    }

    fn load_page(&self, id: Uuid) -> Result<Page> {
        let pages = self.lock_pages()?;
        pages
            .get(&id)
            .cloned()
            .ok_or(LedgerError::PageNotFound(id))
    }

    fn list_pages(&self) -> Result<Vec<Page>> {
        let pages = self.lock_pages()?;
        let mut all: Vec<Page> = pages.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    fn delete_page(&self, id: Uuid) -> Result<()> {
        let mut pages = self.lock_pages()?;
        match pages.remove(&id) {
            Some(_) => Ok(()),
            None => Err(LedgerError::PageNotFound(id)),
        }
    }
}
