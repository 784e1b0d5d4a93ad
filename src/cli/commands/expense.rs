use chrono::NaiveDate;

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::currency::{format_amount, format_month};
use crate::domain::{parse_amount, parse_date, ExpenseId, MonthFilter};

use super::{filter_label, render};

const ADD_USAGE: &str = "add <amount> <description...> [--date YYYY-MM-DD]";
const DELETE_USAGE: &str = "delete <id> [--yes]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new("delete", "Delete an expense by id", DELETE_USAGE, cmd_delete),
        CommandEntry::new("list", "Show expenses for the current filter", "list", cmd_list),
        CommandEntry::new(
            "filter",
            "Show or change the month filter",
            "filter [all|YYYY-MM]",
            cmd_filter,
        ),
        CommandEntry::new("months", "List months that have expenses", "months", cmd_months),
        CommandEntry::new("total", "Show the total for the current filter", "total", cmd_total),
    ]
}

/// Splits `add` arguments into amount text, description words, and an optional date.
fn parse_add_args<'a>(
    args: &[&'a str],
) -> Result<(&'a str, Vec<&'a str>, Option<NaiveDate>), CommandError> {
    let mut positional = Vec::new();
    let mut date = None;
    let mut iter = args.iter().copied();

    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--date=") {
            date = Some(parse_date(value)?);
        } else if arg == "--date" {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments("`--date` needs a value (YYYY-MM-DD)".into())
            })?;
            date = Some(parse_date(value)?);
        } else {
            positional.push(arg);
        }
    }

    let Some((amount, description)) = positional.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    Ok((*amount, description.to_vec(), date))
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, description, date) = parse_add_args(args)?;
    let amount = parse_amount(amount)?;

    let expense = context.ledger.add(amount, description.join(" "), date)?;
    output::success(format!(
        "Added expense {}: {} ({})",
        expense.id,
        expense.description,
        format_amount(expense.amount, &context.config.currency_symbol)
    ));

    context.refresh_filter();
    render(context);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let skip_confirm = args.iter().any(|arg| matches!(*arg, "--yes" | "-y"));
    let raw_id = args
        .iter()
        .find(|arg| !arg.starts_with('-'))
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {DELETE_USAGE}")))?;
    let id: ExpenseId = raw_id
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid expense id `{raw_id}`")))?;

    let Some(expense) = context.ledger.get(id) else {
        output::warning(format!("No expense with id {id}."));
        return Ok(());
    };

    if !skip_confirm && context.mode == CliMode::Interactive {
        let prompt = format!(
            "Are you sure you want to delete this expense ({})?",
            expense.description
        );
        if !io::confirm_action(&context.theme, &prompt, false)? {
            output::info("Deletion cancelled.");
            return Ok(());
        }
    }

    if let Some(removed) = context.ledger.remove(id)? {
        output::success(format!("Deleted expense {}: {}", removed.id, removed.description));
    }

    context.refresh_filter();
    render(context);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render(context);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!(
            "Current filter: {} ({})",
            filter_label(context.filter),
            context.filter
        ));
        return Ok(());
    };

    context.filter = raw.parse::<MonthFilter>()?;
    render(context);
    Ok(())
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let months = context.ledger.available_months();
    if months.is_empty() {
        output::info("No months recorded yet.");
        return Ok(());
    }

    output::section("Months");
    for key in months {
        let marker = if context.filter == MonthFilter::Month(key) {
            '*'
        } else {
            ' '
        };
        println!("{marker} {key}  {}", format_month(key));
    }
    Ok(())
}

fn cmd_total(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let total = context.ledger.total(context.filter);
    println!(
        "Total ({}): {}",
        filter_label(context.filter),
        format_amount(total, &context.config.currency_symbol)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_args_accept_both_date_spellings() {
        let (amount, words, date) =
            parse_add_args(&["12.50", "Flat", "white", "--date", "2024-03-05"]).unwrap();
        assert_eq!(amount, "12.50");
        assert_eq!(words, ["Flat", "white"]);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5));

        let (_, _, date) = parse_add_args(&["1", "x", "--date=2024-02-20"]).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 20));
    }

    #[test]
    fn add_args_require_an_amount() {
        assert!(matches!(
            parse_add_args(&[]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_add_args(&["5", "--date"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn add_args_reject_bad_dates() {
        assert!(matches!(
            parse_add_args(&["5", "Tea", "--date", "yesterday"]),
            Err(CommandError::Ledger(_))
        ));
    }
}
