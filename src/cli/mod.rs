//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the config subcommand,
//! and the alert runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_alert, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{AlertOptions, Cli, Commands, ConfigAction};
pub use presenter::Presenter;
