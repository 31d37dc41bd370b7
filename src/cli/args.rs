//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// makedmt - generate the map data type headers from a schema
#[derive(Parser, Debug)]
#[command(name = "makedmt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if makedmt was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of makedmt.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a schema into the internal and public headers
    #[command(
        name = "generate",
        long_about = "Compile a schema into the internal and public headers.\n\n\
            The schema is read line by line and both headers are written as it \
            goes. On the first invalid line the run stops with a diagnostic; \
            lines written before it are left in the headers.",
        after_help = "\
EXAMPLES:
    # Read the schema from stdin, write headers in the current directory
    makedmt generate < mapdata.dmt

    # Explicit schema and output locations
    makedmt generate mapdata.dmt --internal-out Include/p_maptypes.h \\
        --public-out Include/dd_maptypes.h"
    )]
    Generate {
        /// Schema file; reads stdin if omitted or '-'
        #[arg(value_name = "SCHEMA")]
        schema: Option<PathBuf>,

        /// Where to write the internal header
        #[arg(long, value_name = "PATH")]
        internal_out: Option<PathBuf>,

        /// Where to write the public header
        #[arg(long, value_name = "PATH")]
        public_out: Option<PathBuf>,
    },

    /// Check that the headers on disk match the schema
    #[command(
        name = "check",
        long_about = "Check that the headers on disk match the schema.\n\n\
            The schema is compiled in memory and compared with each configured \
            header. The banner line is ignored, so headers generated by any \
            command line compare equal. Exits non-zero unless both headers are \
            up to date."
    )]
    Check {
        /// Schema file; reads stdin if omitted or '-'
        #[arg(value_name = "SCHEMA")]
        schema: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    makedmt completion bash > ~/.local/share/bash-completion/completions/makedmt

    # Zsh
    makedmt completion zsh > ~/.zfunc/_makedmt

    # Fish
    makedmt completion fish > ~/.config/fish/completions/makedmt.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
