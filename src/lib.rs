#![doc(test(attr(deny(warnings))))]

//! Ledger Core keeps a personal ledger as a set of typed pages, each owning
//! an ordered list of entries, and offers the storage, mutation, and
//! summary primitives that power higher level frontends.

pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}

pub use config::{Config, ConfigManager};
pub use crate::core::services::{KindTotals, LedgerOverview, PageTotals};
pub use crate::core::{EntryService, LedgerStore, SummaryService};
pub use domain::{
    Entry, EntryInput, EntryPatch, FieldValue, Page, PageKind, PagePatch, CURRENT_SCHEMA_VERSION,
};
pub use errors::{ErrorKind, LedgerError, Result};
