//! Plain-text table rendering for the expense listing.

use crate::{
    core::LedgerView,
    currency::{format_amount, format_date},
};

const DESCRIPTION_MAX_WIDTH: usize = 40;

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            header: header.into(),
            max_width: None,
            alignment,
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Columns plus rows of already formatted cells.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Column widths from headers and cells, capped by each column's `max_width`.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = visible_width(&column.header);
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(visible_width(cell));
                    }
                }
                if let Some(max_width) = column.max_width {
                    width = width.min(max_width);
                }
                width
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, widths[idx], column.alignment)
            })
            .collect();
        cells.join("  ").trim_end().to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();

        let mut lines = vec![self.render_row(&header, &widths)];
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        lines.push("-".repeat(rule_width));
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines.join("\n")
    }
}

/// Builds the expense table for a ledger view. Returns `None` when there are no rows.
pub fn expense_table(view: &LedgerView, symbol: &str) -> Option<Table> {
    if view.rows.is_empty() {
        return None;
    }
    let columns = vec![
        TableColumn::new("ID", Alignment::Left),
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Description", Alignment::Left).max_width(DESCRIPTION_MAX_WIDTH),
        TableColumn::new("Amount", Alignment::Right),
    ];
    let rows = view
        .rows
        .iter()
        .map(|expense| {
            vec![
                expense.id.to_string(),
                format_date(expense.date),
                expense.description.clone(),
                format_amount(expense.amount, symbol),
            ]
        })
        .collect();
    Some(Table { columns, rows })
}

/// Message shown in place of the table when a view has no rows.
pub fn empty_message(view: &LedgerView) -> &'static str {
    if view.ledger_is_empty {
        "No expenses yet. Add your first expense with `add <amount> <description>`."
    } else {
        "No expenses found for the selected month."
    }
}

fn visible_width(text: &str) -> usize {
    text.chars().count()
}

fn truncate_text(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = truncate_text(text, width);
    let remaining = width.saturating_sub(visible_width(&fitted));
    match alignment {
        Alignment::Left => format!("{}{}", fitted, " ".repeat(remaining)),
        Alignment::Right => format!("{}{}", " ".repeat(remaining), fitted),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{Expense, ExpenseId, MonthFilter};

    fn view_with(rows: Vec<Expense>) -> LedgerView {
        LedgerView {
            filter: MonthFilter::All,
            total: rows.iter().map(|e| e.amount).sum(),
            ledger_is_empty: rows.is_empty(),
            months: Vec::new(),
            rows,
        }
    }

    #[test]
    fn renders_header_rule_and_right_aligned_amounts() {
        let view = view_with(vec![
            Expense {
                id: ExpenseId(2),
                amount: dec!(40),
                description: "Groceries".into(),
                date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            },
            Expense {
                id: ExpenseId(1),
                amount: dec!(12.5),
                description: "Coffee".into(),
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            },
        ]);

        let rendered = expense_table(&view, "Rs").unwrap().render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("10 Mar 2024"));
        assert!(lines[2].ends_with("Rs40.00"));
        assert!(lines[3].ends_with("Rs12.50"));
    }

    #[test]
    fn long_descriptions_are_truncated() {
        assert_eq!(truncate_text("abcdef", 4), "abc…");
        assert_eq!(truncate_text("abc", 4), "abc");
    }

    #[test]
    fn empty_views_pick_the_right_message() {
        let mut view = view_with(Vec::new());
        assert!(empty_message(&view).starts_with("No expenses yet"));
        view.ledger_is_empty = false;
        assert_eq!(empty_message(&view), "No expenses found for the selected month.");
        assert!(expense_table(&view, "Rs").is_none());
    }
}
