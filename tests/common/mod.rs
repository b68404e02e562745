#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use cashcast::{
    ledger::Observation,
    storage::{CsvStore, ObservationStore},
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Store path inside a fresh directory; the file itself is not created.
pub fn store_path() -> PathBuf {
    test_dir().join("transaction_history.csv")
}

/// Initialized, empty CSV store.
pub fn empty_store() -> CsvStore {
    let store = CsvStore::new(store_path());
    store.initialize().expect("initialize store");
    store
}

/// Initialized CSV store holding `rows`.
pub fn seeded_store(rows: &[Observation]) -> CsvStore {
    let store = empty_store();
    for row in rows {
        store.append(row).expect("seed store");
    }
    store
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn obs(y: i32, m: u32, d: u32, amount: f64) -> Observation {
    Observation::new(date(y, m, d), amount).expect("valid observation")
}
