pub mod entry_service;
pub mod summary_service;

pub use entry_service::EntryService;
pub use summary_service::{KindTotals, LedgerOverview, PageTotals, SummaryService};
