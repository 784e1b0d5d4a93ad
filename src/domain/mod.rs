//! Pure domain models for recorded expenses.
//! No I/O, no CLI, no storage. Only data types and their invariants.

pub mod expense;
pub mod month;

pub use expense::{
    check_amount, parse_amount, parse_date, Expense, ExpenseId, NewExpense, AMOUNT_SCALE, MAX_AMOUNT,
};
pub use month::{MonthFilter, MonthKey};
