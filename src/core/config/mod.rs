//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! makedmt reads one optional project config file describing where the two
//! headers go and how they are framed.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. Path passed with `--config` (must exist)
//! 2. `$MAKEDMT_CONFIG` if set (warns and skips if the file is missing)
//! 3. `makedmt.toml` in the working directory
//!
//! # Example
//!
//! ```no_run
//! use makedmt::core::config::Config;
//! use makedmt::core::types::Sink;
//! use std::path::Path;
//!
//! let result = Config::load(Path::new("."), None).unwrap();
//! let config = result.config;
//!
//! println!("Internal header: {}", config.output_path(Sink::Internal).display());
//! println!("Public header: {}", config.output_path(Sink::Public).display());
//! ```

pub mod schema;

pub use schema::{HeaderConfig, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::compiler::{DocumentLayout, HeaderLayout};
use crate::core::types::{GuardSymbol, IncludeName, Sink};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "MAKEDMT_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "makedmt.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file '{0}' not found")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Resolved configuration.
///
/// Accessors apply defaults for anything the file leaves out. Relative
/// output paths are resolved against the working directory given to
/// [`Config::load`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed project configuration
    pub project: ProjectConfig,
    /// Directory relative paths are resolved against
    base_dir: PathBuf,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Default output file for each header.
    pub fn default_output(sink: Sink) -> &'static str {
        match sink {
            Sink::Internal => "p_maptypes.h",
            Sink::Public => "dd_maptypes.h",
        }
    }

    /// Load configuration for a working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config path does not exist, or if a
    /// config file exists but cannot be read, parsed, or validated. A missing
    /// `makedmt.toml` is not an error (defaults are used).
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_with_env(cwd, explicit, env_path.as_deref())
    }

    /// Load configuration with the `$MAKEDMT_CONFIG` value passed in.
    pub fn load_with_env(
        cwd: &Path,
        explicit: Option<&Path>,
        env_path: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let path = Self::locate(cwd, explicit, env_path, &mut warnings)?;
        let project = match &path {
            Some(path) => Self::read_project_config(path)?,
            None => ProjectConfig::default(),
        };

        project.validate()?;

        Ok(ConfigLoadResult {
            config: Config {
                project,
                base_dir: cwd.to_path_buf(),
                path,
            },
            warnings,
        })
    }

    /// Find the config file to load, if any.
    fn locate(
        cwd: &Path,
        explicit: Option<&Path>,
        env_path: Option<&Path>,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<Option<PathBuf>, ConfigError> {
        // 1. Explicit --config
        if let Some(path) = explicit {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(ConfigError::NotFound(path));
            }
            return Ok(Some(path));
        }

        // 2. $MAKEDMT_CONFIG
        if let Some(path) = env_path {
            let path = cwd.join(path);
            if path.is_file() {
                return Ok(Some(path));
            }
            warnings.push(ConfigWarning {
                message: format!("{CONFIG_ENV} points to a missing file, ignoring it"),
                path,
            });
        }

        // 3. makedmt.toml
        let local = cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Ok(Some(local));
        }

        Ok(None)
    }

    /// Read and parse a project config file.
    fn read_project_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    fn header(&self, sink: Sink) -> Option<&HeaderConfig> {
        match sink {
            Sink::Internal => self.project.internal.as_ref(),
            Sink::Public => self.project.public.as_ref(),
        }
    }

    /// Output path for a header, resolved against the working directory.
    pub fn output_path(&self, sink: Sink) -> PathBuf {
        let relative = self
            .header(sink)
            .and_then(|h| h.path.clone())
            .unwrap_or_else(|| PathBuf::from(Self::default_output(sink)));
        self.base_dir.join(relative)
    }

    /// Fixed banner text, if configured.
    pub fn banner_command(&self) -> Option<&str> {
        self.project.banner_command.as_deref()
    }

    /// Build the guard/include layout for one header.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value fails validation.
    pub fn header_layout(&self, sink: Sink) -> Result<HeaderLayout, ConfigError> {
        let mut layout = HeaderLayout::default_for(sink);
        let Some(header) = self.header(sink) else {
            return Ok(layout);
        };

        if let Some(guard) = &header.guard {
            layout.guard = GuardSymbol::new(guard.as_str())
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if let Some(includes) = &header.includes {
            layout.includes = includes
                .iter()
                .map(|name| {
                    IncludeName::new(name.as_str())
                        .map_err(|e| ConfigError::InvalidValue(e.to_string()))
                })
                .collect::<Result<_, _>>()?;
        }

        Ok(layout)
    }

    /// Build the full document layout.
    ///
    /// `invoked_as` is recorded in the banner unless `banner_command` is set.
    pub fn document_layout(&self, invoked_as: &str) -> Result<DocumentLayout, ConfigError> {
        Ok(DocumentLayout {
            banner_command: self.banner_command().unwrap_or(invoked_as).to_string(),
            internal: self.header_layout(Sink::Internal)?,
            public: self.header_layout(Sink::Public)?,
        })
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
