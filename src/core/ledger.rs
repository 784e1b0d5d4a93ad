//! The expense ledger: owned in-memory list of expenses kept in sync with a
//! key-value store.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    domain::{Expense, ExpenseId, MonthFilter, MonthKey, NewExpense},
    errors::Result,
    storage::{decode_expenses, encode_expenses, KeyValueStore},
};

use super::{
    clock::{Clock, SystemClock},
    ids::IdGenerator,
};

/// Store key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

/// Outcome of restoring the ledger from its store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub warnings: Vec<String>,
    /// The stored document was unreadable and the ledger started empty.
    pub recovered_from_corruption: bool,
}

/// Render-ready snapshot of the ledger for one filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerView {
    pub filter: MonthFilter,
    /// Matching expenses, most recent date first.
    pub rows: Vec<Expense>,
    pub total: Decimal,
    /// Months offered for filtering, most recent first.
    pub months: Vec<MonthKey>,
    /// True when the ledger holds no expenses at all, as opposed to none in the filter.
    pub ledger_is_empty: bool,
}

/// Sole owner of the expense records. Every mutation is written through to the store.
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
    store: Box<dyn KeyValueStore>,
    key: String,
    clock: Box<dyn Clock>,
    ids: IdGenerator,
}

impl ExpenseLedger {
    /// Opens the ledger stored under `key`, using the system clock.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Result<(Self, LoadReport)> {
        Self::open_with_clock(store, key, Box::new(SystemClock))
    }

    pub fn open_with_clock(
        store: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> Result<(Self, LoadReport)> {
        let mut ledger = Self {
            expenses: Vec::new(),
            store,
            key: key.into(),
            clock,
            ids: IdGenerator::default(),
        };
        let report = ledger.load()?;
        Ok((ledger, report))
    }

    /// Replaces the in-memory list with the stored one. A missing entry
    /// yields an empty ledger; an unreadable one does too, with a warning.
    /// Whenever any stored record is left out, the raw document is copied to
    /// [`Self::corrupted_key`] first.
    pub fn load(&mut self) -> Result<LoadReport> {
        let raw = self.store.get(&self.key)?;
        let mut decoded = match raw.as_deref() {
            Some(raw) => decode_expenses(raw),
            None => Default::default(),
        };

        if let (true, Some(raw)) = (decoded.lost_data(), raw.as_deref()) {
            let preserved = self.corrupted_key();
            self.store.set(&preserved, raw)?;
            decoded
                .warnings
                .push(format!("original document preserved under key `{preserved}`"));
        }

        for warning in &decoded.warnings {
            warn!(key = %self.key, "{warning}");
        }

        self.expenses = decoded.expenses;
        self.ids = IdGenerator::seeded(self.expenses.iter().map(|e| &e.id));
        info!(key = %self.key, count = self.expenses.len(), "expense ledger loaded");

        Ok(LoadReport {
            loaded: self.expenses.len(),
            warnings: decoded.warnings,
            recovered_from_corruption: decoded.corrupted,
        })
    }

    /// Records a new expense dated `date`, or today when omitted.
    pub fn add(
        &mut self,
        amount: Decimal,
        description: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<Expense> {
        let mut draft = NewExpense::new(amount, description);
        draft.date = date;
        self.add_draft(draft)
    }

    pub fn add_draft(&mut self, draft: NewExpense) -> Result<Expense> {
        draft.validate()?;
        let id = self.ids.next(self.clock.as_ref());
        let expense = draft.into_expense(id, self.clock.today())?;

        self.expenses.push(expense.clone());
        if let Err(err) = self.persist() {
            self.expenses.pop();
            return Err(err);
        }

        debug!(id = %expense.id, amount = %expense.amount, date = %expense.date, "expense added");
        Ok(expense)
    }

    /// Deletes the expense with `id`. Unknown ids are a no-op and return `None`.
    pub fn remove(&mut self, id: ExpenseId) -> Result<Option<Expense>> {
        let Some(position) = self.expenses.iter().position(|e| e.id == id) else {
            debug!(%id, "remove ignored, no such expense");
            return Ok(None);
        };

        let removed = self.expenses.remove(position);
        if let Err(err) = self.persist() {
            self.expenses.insert(position, removed);
            return Err(err);
        }

        debug!(%id, "expense removed");
        Ok(Some(removed))
    }

    /// Expenses matching `filter`, most recent date first. Same-day entries
    /// keep insertion order.
    pub fn list_filtered(&self, filter: MonthFilter) -> Vec<&Expense> {
        let mut rows: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|expense| filter.matches(expense))
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    /// Exact sum of amounts matching `filter`. Rounding is left to display.
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn total(&self, filter: MonthFilter) -> Decimal {
        let mut total = Decimal::ZERO;
        for expense in self.expenses.iter().filter(|expense| filter.matches(expense)) {
            match total.checked_add(expense.amount) {
                Some(sum) => total = sum,
                None => {
                    warn!(key = %self.key, "expense total overflowed; capping at the maximum");
                    return Decimal::MAX;
                }
            }
        }
        total
    }

    /// Distinct months present in the ledger, most recent first.
    pub fn available_months(&self) -> Vec<MonthKey> {
        let months: BTreeSet<MonthKey> = self
            .expenses
            .iter()
            .map(|expense| MonthKey::of(expense.date))
            .collect();
        months.into_iter().rev().collect()
    }

    /// Writes the full list to the store.
    pub fn persist(&self) -> Result<()> {
        let document = encode_expenses(&self.expenses)?;
        self.store.set(&self.key, &document)?;
        debug!(key = %self.key, count = self.expenses.len(), "expense ledger persisted");
        Ok(())
    }

    pub fn view(&self, filter: MonthFilter) -> LedgerView {
        LedgerView {
            filter,
            rows: self.list_filtered(filter).into_iter().cloned().collect(),
            total: self.total(filter),
            months: self.available_months(),
            ledger_is_empty: self.expenses.is_empty(),
        }
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Expenses in stored (insertion) order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Key an unreadable document is copied to before it can be overwritten.
    pub fn corrupted_key(&self) -> String {
        format!("{}-corrupted", self.key)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
