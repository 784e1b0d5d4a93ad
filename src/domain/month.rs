//! Calendar-month keys (`YYYY-MM`) and the month filter built on them.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};

use crate::{domain::Expense, errors::ValidationError};

/// Identifies a calendar month. Orders chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonthKey(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

/// Selects which expenses a listing or total covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(MonthKey),
}

impl MonthFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(key) => key.contains(expense.date),
        }
    }

    /// Keeps the selected month if it is still offered, else falls back to `All`.
    pub fn retain_within(self, months: &[MonthKey]) -> Self {
        match self {
            MonthFilter::Month(key) if !months.contains(&key) => MonthFilter::All,
            other => other,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Month(key) => key.fmt(f),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        s.parse().map(MonthFilter::Month)
    }
}

impl From<MonthKey> for MonthFilter {
    fn from(key: MonthKey) -> Self {
        MonthFilter::Month(key)
    }
}
