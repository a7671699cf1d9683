// rollcall: attendance marking from the terminal.
//
// Layering:
// - rollcall-types: domain values (students, rosters, roles, audit records)
// - rollcall-engine: pure screen state machine, no I/O
// - rollcall-runtime: storage, config, save worker
// - this crate: argument parsing, console output and the ratatui front end

mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{
    AuditCommand, Cli, Commands, ConfigCommand, RolesCommand, RosterCommand, StudentsCommand,
};
pub use commands::run;
