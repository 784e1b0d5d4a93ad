//! Ledger orchestration: the owned expense list, its clock and id source.

pub mod clock;
pub mod ids;
pub mod ledger;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::IdGenerator;
pub use ledger::{ExpenseLedger, LedgerView, LoadReport, DEFAULT_STORAGE_KEY};
