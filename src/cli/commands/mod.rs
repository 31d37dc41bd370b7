//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds a request from its arguments
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! Handlers do NOT write headers directly.

mod check;
mod completion;
mod generate;

// Re-export command functions for testing and direct invocation
pub use check::check;
pub use completion::completion;
pub use generate::generate;

use crate::cli::args::Command;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Generate {
            schema,
            internal_out,
            public_out,
        } => generate(ctx, schema, internal_out, public_out),
        Command::Check { schema, json } => check(ctx, schema.as_deref(), json),
        Command::Completion { shell } => completion(shell),
    }
}
