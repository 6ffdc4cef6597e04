use std::sync::Mutex;

use ledger_core::{
    config::ConfigManager, core::store::LedgerStore, storage::json_backend::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated store and config backed by a unique directory for each test.
pub fn setup_test_env() -> (LedgerStore, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let store = LedgerStore::new(Box::new(storage));
    let config = ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (store, config)
}
