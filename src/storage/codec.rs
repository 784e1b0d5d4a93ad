//! Encoding of the expense list as the flat JSON array kept in the store.

use std::collections::HashSet;

use serde_json::Value;

use crate::{domain::Expense, errors::PersistenceError};

/// Expenses recovered from a stored document plus anything that had to be dropped.
#[derive(Debug, Clone, Default)]
pub struct DecodedExpenses {
    pub expenses: Vec<Expense>,
    pub warnings: Vec<String>,
    /// Set when the document as a whole could not be read.
    pub corrupted: bool,
    /// Records present in the document but left out of `expenses`.
    pub dropped: usize,
}

impl DecodedExpenses {
    /// True when the document held data that did not make it into `expenses`.
    pub fn lost_data(&self) -> bool {
        self.corrupted || self.dropped > 0
    }

    fn skip(&mut self, warning: String) {
        self.dropped += 1;
        self.warnings.push(warning);
    }
}

pub fn encode_expenses(expenses: &[Expense]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(expenses)?)
}

/// Decodes a stored document. Never fails: an unreadable document yields an
/// empty list flagged as corrupted, unreadable or invalid records are skipped.
pub fn decode_expenses(raw: &str) -> DecodedExpenses {
    let mut decoded = DecodedExpenses::default();

    let records = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(records) => records,
        Err(err) => {
            decoded.corrupted = true;
            decoded
                .warnings
                .push(format!("stored expenses are unreadable ({err}); starting empty"));
            return decoded;
        }
    };

    let mut seen = HashSet::new();
    for (idx, record) in records.into_iter().enumerate() {
        let expense: Expense = match serde_json::from_value(record) {
            Ok(expense) => expense,
            Err(err) => {
                decoded.skip(format!("record #{idx} skipped: {err}"));
                continue;
            }
        };
        if let Some(violation) = expense.violation() {
            decoded.skip(format!("expense {} skipped: {violation}", expense.id));
            continue;
        }
        if !seen.insert(expense.id) {
            decoded.skip(format!("expense {} skipped: duplicate id", expense.id));
            continue;
        }
        decoded.expenses.push(expense);
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_browser_written_array() {
        let raw = r#"[
            {"id":1709600000000,"amount":12.5,"description":"Coffee","date":"2024-03-05"},
            {"id":1710000000000,"amount":40,"description":"Groceries","date":"2024-03-10"}
        ]"#;
        let decoded = decode_expenses(raw);
        assert!(!decoded.corrupted);
        assert!(decoded.warnings.is_empty());
        assert!(!decoded.lost_data());
        assert_eq!(decoded.expenses.len(), 2);
        assert_eq!(decoded.expenses[1].description, "Groceries");
    }

    #[test]
    fn malformed_document_is_flagged_and_empty() {
        let decoded = decode_expenses("{not json");
        assert!(decoded.corrupted);
        assert!(decoded.lost_data());
        assert!(decoded.expenses.is_empty());
        assert_eq!(decoded.warnings.len(), 1);
    }

    #[test]
    fn object_instead_of_array_counts_as_corrupted() {
        let decoded = decode_expenses(r#"{"expenses":[]}"#);
        assert!(decoded.corrupted);
    }

    #[test]
    fn invalid_and_duplicate_records_are_skipped() {
        let raw = r#"[
            {"id":1,"amount":5,"description":"Tea","date":"2024-01-01"},
            {"id":2,"amount":0,"description":"Free","date":"2024-01-01"},
            {"id":3,"amount":5,"description":"   ","date":"2024-01-01"},
            {"id":1,"amount":7,"description":"Copy","date":"2024-01-02"},
            {"id":4,"amount":5,"description":"Bad date","date":"January"}
        ]"#;
        let decoded = decode_expenses(raw);
        assert!(!decoded.corrupted);
        assert_eq!(decoded.expenses.len(), 1);
        assert_eq!(decoded.expenses[0].description, "Tea");
        assert_eq!(decoded.warnings.len(), 4);
        assert_eq!(decoded.dropped, 4);
        assert!(decoded.lost_data());
    }

    #[test]
    fn amounts_beyond_the_storable_limit_are_skipped() {
        let raw = r#"[
            {"id":1,"amount":0.333,"description":"Legacy float","date":"2024-01-01"},
            {"id":2,"amount":7.922816251426434e28,"description":"Huge","date":"2024-01-02"},
            {"id":3,"amount":"79228162514264337593543950335","description":"Max","date":"2024-01-03"}
        ]"#;
        let decoded = decode_expenses(raw);
        assert_eq!(decoded.expenses.len(), 1);
        assert_eq!(decoded.expenses[0].description, "Legacy float");
        assert_eq!(decoded.dropped, 2);
    }
}
