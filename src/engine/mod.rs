//! engine
//!
//! Orchestrates a generator run: Configure -> Open -> Compile -> Report.
//!
//! # Architecture
//!
//! The engine sits between the CLI and the [`crate::compiler`]:
//!
//! 1. **Configure**: load the project config and build the document layout
//! 2. **Open**: open the schema input, then lock and truncate both headers
//! 3. **Compile**: stream the schema through the interpreter
//! 4. **Report**: hand counters and paths back for display
//!
//! `check` replaces steps 2 and 3 with an in-memory compile followed by a
//! comparison against the headers on disk.
//!
//! # Invariants
//!
//! - The schema is opened before any header is truncated
//! - A syntax error is returned unchanged so its diagnostic reaches stderr
//!   as written
//! - Partial headers are left on disk after a syntax error

pub mod output;
pub mod runner;

pub use output::{HeaderFile, OutputError};
pub use runner::{
    check, generate, CheckReport, GenerateReport, GenerateRequest, HeaderCheck, HeaderStatus,
    RunError,
};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Explicit config file.
    pub config: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Command line recorded in generated banners.
    pub invoked_as: String,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            config: None,
            debug: false,
            quiet: false,
            invoked_as: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl Context {
    /// Output verbosity from the quiet and debug flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory relative paths are resolved against.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the process working
    /// directory cannot be determined.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod context {
        use super::*;

        #[test]
        fn default_values() {
            let ctx = Context::default();
            assert!(ctx.cwd.is_none());
            assert!(ctx.config.is_none());
            assert!(!ctx.debug);
            assert!(!ctx.quiet);
            assert_eq!(ctx.invoked_as, "makedmt");
            assert_eq!(ctx.verbosity(), Verbosity::Normal);
        }

        #[test]
        fn quiet_wins_over_debug() {
            let ctx = Context {
                debug: true,
                quiet: true,
                ..Default::default()
            };
            assert_eq!(ctx.verbosity(), Verbosity::Quiet);
        }

        #[test]
        fn working_dir_prefers_override() {
            let ctx = Context {
                cwd: Some(PathBuf::from("/custom")),
                ..Default::default()
            };
            assert_eq!(ctx.working_dir().unwrap(), PathBuf::from("/custom"));
        }
    }
}
