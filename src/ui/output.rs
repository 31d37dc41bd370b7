//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! Results go to stdout; warnings, errors, and debug lines go to stderr so
//! they never mix with a header piped through stdout.
//! When `--json` is enabled, `check` output is machine-readable JSON.

use std::fmt::Display;

use crate::compiler::Stats;
use crate::engine::{CheckReport, HeaderCheck};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Pluralize a count: `1 struct`, `2 structs`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// One-line summary of a compile run.
pub fn format_stats(stats: &Stats) -> String {
    format!(
        "{}, {}, {}, {}",
        count(stats.structs, "struct"),
        count(stats.fields, "field"),
        count(stats.accessors, "accessor"),
        count(stats.verbatim_lines, "verbatim line"),
    )
}

/// One line per header: `up-to-date  internal  p_maptypes.h  (3f2a...)`.
pub fn format_header_check(check: &HeaderCheck) -> String {
    format!(
        "{:<10}  {:<8}  {}  ({})",
        check.status.to_string(),
        check.sink.to_string(),
        check.path.display(),
        check.fingerprint.short()
    )
}

/// Human-readable `check` report.
pub fn format_check_report(report: &CheckReport) -> String {
    report
        .headers
        .iter()
        .map(format_header_check)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Fingerprint, Sink};
    use crate::engine::HeaderStatus;
    use std::path::PathBuf;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn stats_pluralize() {
        let stats = Stats {
            lines: 10,
            structs: 1,
            fields: 3,
            accessors: 2,
            verbatim_lines: 0,
        };
        assert_eq!(
            format_stats(&stats),
            "1 struct, 3 fields, 2 accessors, 0 verbatim lines"
        );
    }

    #[test]
    fn check_lines_align() {
        let report = CheckReport {
            headers: vec![
                HeaderCheck {
                    sink: Sink::Internal,
                    path: PathBuf::from("p_maptypes.h"),
                    status: HeaderStatus::UpToDate,
                    fingerprint: Fingerprint::of_document(b""),
                },
                HeaderCheck {
                    sink: Sink::Public,
                    path: PathBuf::from("dd_maptypes.h"),
                    status: HeaderStatus::Stale,
                    fingerprint: Fingerprint::of_document(b""),
                },
            ],
        };

        let text = format_check_report(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("up-to-date  internal  p_maptypes.h  ("));
        assert!(lines[1].starts_with("stale       public    dd_maptypes.h  ("));
        assert!(lines[1].ends_with(')'));
    }
}
