//! Dispatch, error reporting, and the error types shared by CLI commands.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::errors::{LedgerError, PersistenceError, ValidationError};

use super::output;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Command(String),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Failures of a single command. Reported, then the shell carries on.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::Ledger(LedgerError::Validation(err))
    }
}

impl From<PersistenceError> for CliError {
    fn from(err: PersistenceError) -> Self {
        CliError::Core(LedgerError::Persistence(err))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Ledger(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(&err.message);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(LedgerError::Validation(err)) => {
                output::error(format!("Please enter a valid amount and description: {err}"));
            }
            CommandError::Ledger(LedgerError::Persistence(err)) => {
                output::error(format!("Could not save expenses: {err}"));
                output::hint("Your last change was not applied.");
            }
            other => output::error(other),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::in_memory(CliMode::Script)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err),
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{MonthFilter, MonthKey};

    #[test]
    fn script_adds_and_filters() {
        let app = process_script(&[
            "add 12.50 Coffee --date 2024-03-05",
            "add 40 Groceries --date=2024-03-10",
            "add 15 Bus --date 2024-02-20",
            "filter 2024-03",
        ])
        .expect("script runs");

        assert_eq!(app.ledger.len(), 3);
        assert_eq!(
            app.filter,
            MonthFilter::Month(MonthKey::new(2024, 3).unwrap())
        );
        assert_eq!(app.ledger.total(app.filter), dec!(52.50));
    }

    #[test]
    fn multi_word_descriptions_are_joined() {
        let app = process_script(&["add 9.99 \"Movie night\" snacks"]).unwrap();
        assert_eq!(app.ledger.expenses()[0].description, "Movie night snacks");
    }

    #[test]
    fn invalid_add_leaves_ledger_untouched() {
        let app = process_script(&[
            "add 0 Nothing",
            "add 5",
            "add abc Tea",
            "add 99999999999999 Yacht",
            "add 0.005 Crumb",
        ])
        .unwrap();
        assert!(app.ledger.is_empty());
    }

    #[test]
    fn delete_removes_and_resets_vanished_filter() {
        let mut app = process_script(&[
            "add 15 Bus --date 2024-02-20",
            "add 3 Tea --date 2024-03-01",
            "filter 2024-02",
        ])
        .unwrap();
        let bus = app.ledger.expenses()[0].id;

        app.process_line(&format!("delete {bus}")).unwrap();

        assert_eq!(app.ledger.len(), 1);
        assert_eq!(app.filter, MonthFilter::All);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut app = process_script(&["add 3 Tea"]).unwrap();
        app.process_line("delete 1").unwrap();
        assert_eq!(app.ledger.len(), 1);
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut app = process_script(&[]).unwrap();
        assert_eq!(app.process_line("exit").unwrap(), LoopControl::Exit);
        assert!(!app.running);
    }
}
