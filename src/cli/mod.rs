//! cli
//!
//! Command-line interface layer for makedmt.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT open or write headers directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::compiler::document::command_line;
use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        config: cli.config.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        invoked_as: command_line(std::env::args_os()),
    };

    commands::dispatch(cli.command, &ctx)
}
