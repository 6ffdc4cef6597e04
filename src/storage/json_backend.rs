use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::warn;
use uuid::Uuid;

use crate::domain::Page;
use crate::errors::LedgerError;
use crate::utils::{app_data_dir, ensure_dir, pages_dir_in};

use super::{Result, StorageBackend};

const PAGE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem backend keeping one JSON document per page, named after the
/// page id. Writes land in a temporary sibling first and are renamed into
/// place, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    pages_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = root.unwrap_or_else(app_data_dir);
        let pages_dir = pages_dir_in(&base);
        ensure_dir(&pages_dir)?;
        Ok(Self { pages_dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn page_path(&self, id: Uuid) -> PathBuf {
        self.pages_dir.join(format!("{}.{}", id, PAGE_EXTENSION))
    }

    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }
}

impl StorageBackend for JsonStorage {
    fn save_page(&self, page: &Page) -> Result<()> {
        let path = self.page_path(page.id);
        save_page_to_path(page, &path)
    }

    fn load_page(&self, id: Uuid) -> Result<Page> {
        let path = self.page_path(id);
        if !path.exists() {
            return Err(LedgerError::PageNotFound(id));
        }
        load_page_from_path(&path)
    }

    fn list_pages(&self) -> Result<Vec<Page>> {
        if !self.pages_dir.exists() {
            return Ok(Vec::new());
        }
        let mut pages = Vec::new();
        for entry in fs::read_dir(&self.pages_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }
            match load_page_from_path(&path) {
                Ok(page) => pages.push(page),
                Err(err) => {
                    warn!(
                        "skipping unreadable page file `{}`: {}",
                        path.display(),
                        err
                    );
                }
            }
        }
        pages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pages)
    }

    fn delete_page(&self, id: Uuid) -> Result<()> {
        let path = self.page_path(id);
        if !path.exists() {
            return Err(LedgerError::PageNotFound(id));
        }
        fs::remove_file(&path)?;
        Ok(())
    }
}

/// Saves a page to an arbitrary path on disk.
pub fn save_page_to_path(page: &Page, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(page)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a page from the provided filesystem path.
pub fn load_page_from_path(path: &Path) -> Result<Page> {
    let data = fs::read_to_string(path)?;
    let page: Page = serde_json::from_str(&data)?;
    Ok(page)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
