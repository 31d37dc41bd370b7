//! engine::runner
//!
//! Entry points for the two generator runs.
//!
//! # Architecture
//!
//! ```text
//! generate: Config -> Layout -> Open schema -> Lock headers -> Compile -> Report
//! check:    Config -> Layout -> Open schema -> Compile in memory -> Compare
//! ```
//!
//! Both runs resolve the config and layout the same way, so a `check` right
//! after a `generate` with the same settings always reports up to date.
//!
//! # Example
//!
//! ```no_run
//! use makedmt::engine::{generate, Context, GenerateRequest};
//!
//! let ctx = Context::default();
//! let report = generate(&ctx, &GenerateRequest::default()).unwrap();
//! println!("{} structs", report.stats.structs);
//! ```

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::output::{HeaderFile, OutputError};
use super::Context;
use crate::compiler::{self, CompileError, DocumentLayout, Outputs, ParserState, Stats};
use crate::core::config::{Config, ConfigError};
use crate::core::types::{strip_banner, Fingerprint, Sink};
use crate::ui::output;

/// Schema argument meaning standard input.
pub const STDIN_MARKER: &str = "-";

/// Errors from a generator run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The schema was rejected or could not be read.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// An output header could not be opened.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// The schema file could not be opened.
    #[error("failed to open schema '{path}': {source}")]
    Input { path: PathBuf, source: io::Error },

    /// Both headers would be written to one file.
    #[error("internal and public headers both resolve to '{}'", .0.display())]
    SameOutput(PathBuf),

    /// The working directory could not be determined.
    #[error("failed to determine working directory: {0}")]
    WorkingDir(#[source] io::Error),
}

impl RunError {
    /// Check if this is a syntax error in the schema.
    pub fn is_syntax(&self) -> bool {
        matches!(self, RunError::Compile(e) if e.is_syntax())
    }
}

/// What to generate and where.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Schema file; `None` or `-` reads standard input.
    pub schema: Option<PathBuf>,
    /// Override for the internal header path.
    pub internal_out: Option<PathBuf>,
    /// Override for the public header path.
    pub public_out: Option<PathBuf>,
}

impl GenerateRequest {
    fn output_override(&self, sink: Sink) -> Option<&Path> {
        match sink {
            Sink::Internal => self.internal_out.as_deref(),
            Sink::Public => self.public_out.as_deref(),
        }
    }
}

/// Result of a successful `generate`.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub internal_path: PathBuf,
    pub public_path: PathBuf,
    pub stats: Stats,
    /// Anything but `Idle` means the schema ended inside a block.
    pub final_state: ParserState,
}

/// State of one header on disk relative to the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStatus {
    UpToDate,
    Stale,
    Missing,
}

impl std::fmt::Display for HeaderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HeaderStatus::UpToDate => "up-to-date",
            HeaderStatus::Stale => "stale",
            HeaderStatus::Missing => "missing",
        };
        write!(f, "{label}")
    }
}

/// Comparison result for one header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCheck {
    pub sink: Sink,
    pub path: PathBuf,
    pub status: HeaderStatus,
    /// Fingerprint of the freshly generated document.
    pub fingerprint: Fingerprint,
}

/// Result of `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub headers: Vec<HeaderCheck>,
}

impl CheckReport {
    /// True if every header matches the schema.
    pub fn is_up_to_date(&self) -> bool {
        self.headers
            .iter()
            .all(|h| h.status == HeaderStatus::UpToDate)
    }
}

/// Load config and resolve paths shared by both runs.
fn prepare(ctx: &Context) -> Result<(PathBuf, Config), RunError> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.working_dir().map_err(RunError::WorkingDir)?;

    let loaded = Config::load(&cwd, ctx.config.as_deref())?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    match loaded.config.loaded_from() {
        Some(path) => output::debug(format!("config: {}", path.display()), verbosity),
        None => output::debug("config: defaults", verbosity),
    }

    Ok((cwd, loaded.config))
}

/// Open the schema, or standard input when no path (or `-`) is given.
fn open_schema(cwd: &Path, schema: Option<&Path>) -> Result<Box<dyn BufRead>, RunError> {
    match schema {
        Some(path) if path.as_os_str() != STDIN_MARKER => {
            let path = cwd.join(path);
            let file = File::open(&path).map_err(|source| RunError::Input { path, source })?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn describe_schema(schema: Option<&Path>) -> String {
    match schema {
        Some(path) if path.as_os_str() != STDIN_MARKER => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

/// True if both paths name one file, either lexically or once resolved.
fn same_output(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn layout_for(ctx: &Context, config: &Config) -> Result<DocumentLayout, RunError> {
    let layout = config.document_layout(&ctx.invoked_as)?;
    output::debug(
        format!("banner: {}", layout.banner().trim_end()),
        ctx.verbosity(),
    );
    Ok(layout)
}

/// Compile a schema into both headers on disk.
///
/// The schema is opened before either header is touched. Headers are then
/// locked, truncated, and written as lines are read. On a syntax error the
/// headers keep whatever was written before the failing line.
///
/// # Errors
///
/// Returns `RunError::Compile` with the syntax diagnostic on the first bad
/// line, `RunError::SameOutput` if both headers resolve to one file, or
/// another variant if config, input, or output setup fails.
pub fn generate(ctx: &Context, request: &GenerateRequest) -> Result<GenerateReport, RunError> {
    let verbosity = ctx.verbosity();
    let (cwd, config) = prepare(ctx)?;
    let layout = layout_for(ctx, &config)?;

    let output_path = |sink: Sink| match request.output_override(sink) {
        Some(path) => cwd.join(path),
        None => config.output_path(sink),
    };
    let internal_path = output_path(Sink::Internal);
    let public_path = output_path(Sink::Public);
    if same_output(&internal_path, &public_path) {
        return Err(RunError::SameOutput(internal_path));
    }

    let input = open_schema(&cwd, request.schema.as_deref())?;
    output::debug(
        format!("schema: {}", describe_schema(request.schema.as_deref())),
        verbosity,
    );

    let internal = HeaderFile::create(&internal_path)?;
    let public = HeaderFile::create(&public_path)?;
    output::debug(format!("internal: {}", internal_path.display()), verbosity);
    output::debug(format!("public: {}", public_path.display()), verbosity);

    let compiled = compiler::compile(
        input,
        &layout,
        Outputs::new(internal, public),
        verbosity,
    )?;
    output::debug(
        format!("read {} lines, headers finalized", compiled.stats.lines),
        verbosity,
    );
    if !compiled.final_state.is_idle() {
        output::debug(
            format!("input ended in state {}", compiled.final_state),
            verbosity,
        );
    }

    Ok(GenerateReport {
        internal_path,
        public_path,
        stats: compiled.stats,
        final_state: compiled.final_state,
    })
}

/// Compare the headers on disk with what the schema would generate.
///
/// The banner line is ignored on both sides.
///
/// # Errors
///
/// Returns `RunError::Compile` on a syntax error, or another variant if
/// config or input setup fails. Unreadable headers count as missing.
pub fn check(ctx: &Context, schema: Option<&Path>) -> Result<CheckReport, RunError> {
    let verbosity = ctx.verbosity();
    let (cwd, config) = prepare(ctx)?;
    let layout = layout_for(ctx, &config)?;

    let input = open_schema(&cwd, schema)?;
    output::debug(format!("schema: {}", describe_schema(schema)), verbosity);

    let generated = compiler::compile_in_memory(input, &layout)?;

    let headers = Sink::ALL
        .into_iter()
        .map(|sink| {
            let path = config.output_path(sink);
            let fresh = generated.document(sink).as_bytes();
            let status = match fs::read(&path) {
                Ok(existing) if strip_banner(&existing) == strip_banner(fresh) => {
                    HeaderStatus::UpToDate
                }
                Ok(_) => HeaderStatus::Stale,
                Err(_) => HeaderStatus::Missing,
            };
            output::debug(format!("{sink}: {} is {status}", path.display()), verbosity);

            HeaderCheck {
                sink,
                path,
                status,
                fingerprint: Fingerprint::of_document(fresh),
            }
        })
        .collect();

    Ok(CheckReport { headers })
}
