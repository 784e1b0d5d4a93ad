//! The expense record and the validated draft it is built from.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Fraction digits an entered amount may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest amount accepted for a new expense: `9999999999999.99`.
///
/// Amounts are stored as JSON numbers; fifteen significant digits read back
/// unchanged.
pub const MAX_AMOUNT: Decimal =
    Decimal::from_parts(2_764_472_319, 232_830, 0, false, AMOUNT_SCALE);

/// Identifier of a stored expense. Persisted as a plain JSON integer
/// (historically a millisecond timestamp).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ExpenseId(pub u64);

impl ExpenseId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ExpenseId)
    }
}

/// A single recorded monetary outflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

impl Expense {
    /// Returns the reason this record breaks the ledger invariants, if any.
    ///
    /// Stored records may carry more than two decimals (older stores kept raw
    /// floats), but never more than [`MAX_AMOUNT`].
    pub fn violation(&self) -> Option<ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Some(ValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Some(ValidationError::AmountTooLarge(self.amount));
        }
        if self.description.trim().is_empty() {
            return Some(ValidationError::EmptyDescription);
        }
        None
    }
}

/// User-supplied fields for an expense that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub description: String,
    pub date: Option<NaiveDate>,
}

impl NewExpense {
    pub fn new(amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Checks the draft and returns the trimmed description on success.
    pub fn validate(&self) -> Result<String, ValidationError> {
        check_amount(self.amount)?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(description.to_string())
    }

    /// Finalizes the draft into a stored record.
    pub fn into_expense(
        self,
        id: ExpenseId,
        today: NaiveDate,
    ) -> Result<Expense, ValidationError> {
        let description = self.validate()?;
        Ok(Expense {
            id,
            amount: self.amount,
            description,
            date: self.date.unwrap_or(today),
        })
    }
}

/// Accepts positive amounts of at most two decimals up to [`MAX_AMOUNT`].
/// Trailing zeros do not count, so `12.500` is fine.
pub fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::TooManyDecimals(amount));
    }
    Ok(())
}

/// Parses user-entered amount text such as `12.50`.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidAmount(input.to_string()))
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}
