#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use expense_ledger::{
    core::{ExpenseLedger, FixedClock, LoadReport, DEFAULT_STORAGE_KEY},
    storage::{JsonFileStore, KeyValueStore},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Opens a ledger over `store` with the clock pinned to 2024-03-15.
pub fn open_ledger(store: impl KeyValueStore + 'static) -> (ExpenseLedger, LoadReport) {
    ExpenseLedger::open_with_clock(
        Box::new(store),
        DEFAULT_STORAGE_KEY,
        Box::new(FixedClock::on(date(2024, 3, 15))),
    )
    .expect("open ledger")
}

/// A file-backed store in a fresh directory that outlives the calling test.
pub fn file_store() -> JsonFileStore {
    let temp = TempDir::new().expect("create temp dir");
    let root = temp.path().join("store");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonFileStore::new(root).expect("create json file store")
}
