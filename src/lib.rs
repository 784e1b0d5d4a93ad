#![doc(test(attr(deny(warnings))))]

//! Expense Ledger records monetary expenses, keeps them in a local key-value
//! store, and answers the month-filtered listings and totals a presentation
//! layer renders.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::{ExpenseLedger, LedgerView, LoadReport};
pub use crate::domain::{Expense, ExpenseId, MonthFilter, MonthKey};
pub use crate::errors::{LedgerError, PersistenceError, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense ledger tracing initialized.");
    });
}
