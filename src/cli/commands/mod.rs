pub mod expense;
pub mod system;

use crate::{
    currency::{format_amount, format_month},
    domain::MonthFilter,
};

use super::{
    output,
    registry::{CommandEntry, CommandRegistry},
    shell_context::ShellContext,
    table::{empty_message, expense_table},
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(expense::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for entry in definitions() {
        registry.register(entry);
    }
    registry
}

/// Human label for a filter selection, e.g. `All Months` or `March 2024`.
pub(crate) fn filter_label(filter: MonthFilter) -> String {
    match filter {
        MonthFilter::All => "All Months".to_string(),
        MonthFilter::Month(key) => format_month(key),
    }
}

/// Prints the listing and total for the current filter.
pub(crate) fn render(context: &ShellContext) {
    let view = context.ledger.view(context.filter);
    let symbol = &context.config.currency_symbol;

    output::section(format!("Expenses: {}", filter_label(view.filter)));
    match expense_table(&view, symbol) {
        Some(table) => println!("{}", table.render()),
        None => output::info(empty_message(&view)),
    }
    println!("Total: {}", format_amount(view.total, symbol));
}
