use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity};
use crate::domain::entry::Entry;
use crate::errors::{LedgerError, Result};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The two ledger directions a page can record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Deoya,
    Neoya,
}

impl PageKind {
    pub const ALL: [PageKind; 2] = [PageKind::Deoya, PageKind::Neoya];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Deoya => "deoya",
            PageKind::Neoya => "neoya",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim() {
            "deoya" => Ok(PageKind::Deoya),
            "neoya" => Ok(PageKind::Neoya),
            other => Err(LedgerError::Validation(format!(
                "unknown page type `{}` (expected `deoya` or `neoya`)",
                other
            ))),
        }
    }
}

/// A titled page of the ledger. Pages own their entries outright; an entry
/// never exists outside the page it was added to, and the whole page is the
/// unit of persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: PageKind,
    #[serde(default)]
    pub entries: Vec<Entry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Page::schema_version_default")]
    pub schema_version: u8,
}

impl Page {
    pub fn new(title: impl Into<String>, kind: PageKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            kind,
            entries: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Trims a candidate title, rejecting the empty result.
    pub fn validate_title(candidate: &str) -> Result<String> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::Validation(
                "page title must not be empty".into(),
            ));
        }
        Ok(trimmed.to_string())
    }

    pub fn add_entry(&mut self, entry: Entry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        self.touch();
        id
    }

    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, id: Uuid) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    pub fn remove_entry(&mut self, id: Uuid) -> Option<Entry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        let removed = self.entries.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Identifiable for Page {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Page {
    fn name(&self) -> &str {
        &self.title
    }
}

/// Partial update for a page's own fields. Absent fields keep their value;
/// entries are never touched through this path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub kind: Option<PageKind>,
}

impl PagePatch {
    pub fn has_effect(&self) -> bool {
        self.title.is_some() || self.kind.is_some()
    }

    pub fn apply_to(&self, page: &mut Page) -> Result<()> {
        if !self.has_effect() {
            return Ok(());
        }
        if let Some(title) = &self.title {
            page.title = Page::validate_title(title)?;
        }
        if let Some(kind) = self.kind {
            page.kind = kind;
        }
        page.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::EntryInput;

    #[test]
    fn kind_parses_the_closed_set_only() {
        assert_eq!("deoya".parse::<PageKind>().unwrap(), PageKind::Deoya);
        assert_eq!(" neoya ".parse::<PageKind>().unwrap(), PageKind::Neoya);
        assert!("Deoya".parse::<PageKind>().is_err());
        assert!("savings".parse::<PageKind>().is_err());
    }

    #[test]
    fn titles_are_trimmed_and_must_not_be_blank() {
        assert_eq!(Page::validate_title("  January  ").unwrap(), "January");
        assert!(Page::validate_title("   ").is_err());
        assert!(Page::validate_title("").is_err());
    }

    #[test]
    fn adding_and_removing_entries_touches_the_page() {
        let mut page = Page::new("January", PageKind::Deoya);
        let created = page.updated_at;

        let id = page.add_entry(EntryInput::new(1, 100).into_entry().unwrap());
        assert_eq!(page.entry_count(), 1);
        assert!(page.updated_at >= created);
        assert!(page.entry(id).is_some());

        let removed = page.remove_entry(id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(page.entry_count(), 0);
        assert!(page.remove_entry(id).is_none());
    }

    #[test]
    fn pages_serialize_kind_under_the_type_key() {
        let page = Page::new("January", PageKind::Neoya);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["type"], "neoya");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn patch_replaces_only_present_fields() {
        let mut page = Page::new("January", PageKind::Deoya);
        let patch = PagePatch {
            kind: Some(PageKind::Neoya),
            ..PagePatch::default()
        };
        patch.apply_to(&mut page).unwrap();
        assert_eq!(page.title, "January");
        assert_eq!(page.kind, PageKind::Neoya);

        let bad = PagePatch {
            title: Some("   ".into()),
            ..PagePatch::default()
        };
        assert!(bad.apply_to(&mut page).is_err());
        assert_eq!(page.title, "January");
    }
}
