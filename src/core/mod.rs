pub mod services;
pub mod store;

pub use services::{EntryService, SummaryService};
pub use store::LedgerStore;
