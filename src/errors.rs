use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::value::CoerceError;

/// Unified error type for the store, mutator, and persistence layers.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Page not found: {0}")]
    PageNotFound(Uuid),
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, LedgerError>;

/// Coarse classification of a [`LedgerError`], for callers that map failures
/// onto a transport (status codes, exit codes) without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Validation(_) => ErrorKind::Validation,
            LedgerError::PageNotFound(_) | LedgerError::EntryNotFound(_) => ErrorKind::NotFound,
            LedgerError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<CoerceError> for LedgerError {
    fn from(err: CoerceError) -> Self {
        LedgerError::Validation(err.to_string())
    }
}
