use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{ExpenseLedger, LoadReport},
    domain::MonthFilter,
    storage::{JsonFileStore, KeyValueStore},
};

use super::{commands, core::CliError, output, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a running shell owns: the ledger, preferences, and the current filter.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: ExpenseLedger,
    pub config: Config,
    pub filter: MonthFilter,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Opens the ledger configured under the application data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        Self::with_config_manager(mode, &manager)
    }

    pub fn with_config_manager(mode: CliMode, manager: &ConfigManager) -> Result<Self, CliError> {
        let config = manager.load()?;
        let store = JsonFileStore::new(config.resolve_store_dir(manager.base_dir()))?;
        Self::with_store(mode, config, Box::new(store))
    }

    pub fn with_store(
        mode: CliMode,
        config: Config,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, CliError> {
        let (ledger, report) = ExpenseLedger::open(store, config.storage_key.clone())?;
        report_load(&report);

        Ok(Self {
            mode,
            registry: commands::registry(),
            ledger,
            config,
            filter: MonthFilter::All,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    #[cfg(test)]
    pub(crate) fn in_memory(mode: CliMode) -> Result<Self, CliError> {
        Self::with_store(
            mode,
            Config::default(),
            Box::new(crate::storage::MemoryStore::new()),
        )
    }

    pub fn prompt(&self) -> String {
        format!("expenses [{}]> ", self.filter)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Drops the month filter if its month no longer holds any expense.
    pub fn refresh_filter(&mut self) {
        self.filter = self.filter.retain_within(&self.ledger.available_months());
    }
}

fn report_load(report: &LoadReport) {
    if report.recovered_from_corruption {
        output::warning("Stored expenses could not be read; starting with an empty ledger.");
    }
    for warning in &report.warnings {
        output::warning(warning);
    }
}

#[cfg(test)]
mod tests {
    use colored::control::{self, SHOULD_COLORIZE};

    use super::*;

    #[test]
    fn building_a_context_leaves_colour_settings_alone() {
        control::set_override(true);
        let context = ShellContext::in_memory(CliMode::Script).expect("context");
        let still_coloured = SHOULD_COLORIZE.should_colorize();
        control::unset_override();

        assert!(still_coloured);
        assert_eq!(context.filter, MonthFilter::All);
        assert!(context.ledger.is_empty());
    }
}
