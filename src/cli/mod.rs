//! Terminal front end: renders the ledger and turns typed commands into
//! ledger operations.

pub mod commands;
pub mod core;
mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod table;

pub use shell::run_cli;
