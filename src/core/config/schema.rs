//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Project Config
//!
//! Located at (in order of precedence):
//! 1. `--config <path>` if given
//! 2. `$MAKEDMT_CONFIG` if set
//! 3. `makedmt.toml` in the working directory
//!
//! # Validation
//!
//! Config values are validated after parsing so that a bad guard symbol or
//! include name is reported before any header is opened for writing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{GuardSymbol, IncludeName};

/// Project configuration.
///
/// # Example
///
/// ```toml
/// banner_command = "Scripts/makedmt.py"
///
/// [internal]
/// path = "Include/p_maptypes.h"
/// guard = "__DOOMSDAY_PLAY_MAP_DATA_TYPES_H__"
/// includes = ["p_data.h"]
///
/// [public]
/// path = "Include/dd_maptypes.h"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Fixed text for the banner instead of the invoking command line
    pub banner_command: Option<String>,

    /// Internal header settings
    pub internal: Option<HeaderConfig>,

    /// Public header settings
    pub public: Option<HeaderConfig>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(command) = &self.banner_command {
            if command.contains('\n') || command.contains("*/") {
                return Err(ConfigError::InvalidValue(
                    "banner_command cannot contain line breaks or '*/'".to_string(),
                ));
            }
        }

        if let Some(internal) = &self.internal {
            internal.validate("internal")?;
        }
        if let Some(public) = &self.public {
            public.validate("public")?;
        }

        if let (Some(internal), Some(public)) = (&self.internal, &self.public) {
            if internal.guard.is_some() && internal.guard == public.guard {
                return Err(ConfigError::InvalidValue(
                    "internal and public headers must use different guards".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Settings for one generated header.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Output file, relative to the working directory
    pub path: Option<PathBuf>,

    /// Include guard symbol
    pub guard: Option<String>,

    /// Files pulled in with `#include "..."` after the guard
    pub includes: Option<Vec<String>>,
}

impl HeaderConfig {
    /// Validate the header settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending section.
    pub fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "[{section}] path cannot be empty"
                )));
            }
        }

        if let Some(guard) = &self.guard {
            GuardSymbol::new(guard.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("[{section}] {e}")))?;
        }

        for include in self.includes.iter().flatten() {
            IncludeName::new(include.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("[{section}] {e}")))?;
        }

        Ok(())
    }
}
