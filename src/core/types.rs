//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Sink`] - Which generated header a line is written to
//! - [`GuardSymbol`] - Validated include-guard macro name
//! - [`IncludeName`] - Validated `#include` target
//! - [`Fingerprint`] - Content hash of a generated header
//!
//! # Validation
//!
//! These types enforce validity at construction time. A configuration that
//! would produce an uncompilable header is rejected before any output file
//! is touched.
//!
//! # Examples
//!
//! ```
//! use makedmt::core::types::{GuardSymbol, IncludeName};
//!
//! let guard = GuardSymbol::new("__MY_MAP_TYPES_H__").unwrap();
//! let include = IncludeName::new("p_data.h").unwrap();
//! assert_eq!(guard.as_str(), "__MY_MAP_TYPES_H__");
//! assert_eq!(include.as_str(), "p_data.h");
//!
//! assert!(GuardSymbol::new("1BAD").is_err());
//! assert!(IncludeName::new("a\"b.h").is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid guard symbol: {0}")]
    InvalidGuardSymbol(String),

    #[error("invalid include name: {0}")]
    InvalidIncludeName(String),
}

/// One of the two generated headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sink {
    /// Full struct layouts.
    Internal,
    /// Field-access macros only.
    Public,
}

impl Sink {
    /// Both sinks, internal first.
    pub const ALL: [Sink; 2] = [Sink::Internal, Sink::Public];

    /// Resolve the verbatim-block keyword naming this sink.
    ///
    /// # Example
    ///
    /// ```
    /// use makedmt::core::types::Sink;
    ///
    /// assert_eq!(Sink::from_keyword("internal"), Some(Sink::Internal));
    /// assert_eq!(Sink::from_keyword("public"), Some(Sink::Public));
    /// assert_eq!(Sink::from_keyword("struct"), None);
    /// ```
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "internal" => Some(Sink::Internal),
            "public" => Some(Sink::Public),
            _ => None,
        }
    }

    /// The keyword that opens a verbatim block for this sink.
    pub fn keyword(self) -> &'static str {
        match self {
            Sink::Internal => "internal",
            Sink::Public => "public",
        }
    }
}

impl std::fmt::Display for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A validated C preprocessor symbol used as an include guard.
///
/// Guards must be non-empty C identifiers: ASCII letters, digits and
/// underscores, not starting with a digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuardSymbol(String);

impl GuardSymbol {
    /// Guard of the internal header unless configured otherwise.
    pub const DEFAULT_INTERNAL: &'static str = "__DOOMSDAY_PLAY_MAP_DATA_TYPES_H__";

    /// Guard of the public header unless configured otherwise.
    pub const DEFAULT_PUBLIC: &'static str = "__DOOMSDAY_PLAY_PUBLIC_MAP_DATA_TYPES_H__";

    /// Create a new validated guard symbol.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidGuardSymbol` if the symbol is not a C identifier.
    pub fn new(symbol: impl Into<String>) -> Result<Self, TypeError> {
        let symbol = symbol.into();
        Self::validate(&symbol)?;
        Ok(Self(symbol))
    }

    /// The default guard for the given header.
    pub fn default_for(sink: Sink) -> Self {
        match sink {
            Sink::Internal => Self(Self::DEFAULT_INTERNAL.to_string()),
            Sink::Public => Self(Self::DEFAULT_PUBLIC.to_string()),
        }
    }

    fn validate(symbol: &str) -> Result<(), TypeError> {
        let mut chars = symbol.chars();
        let Some(first) = chars.next() else {
            return Err(TypeError::InvalidGuardSymbol(
                "guard symbol cannot be empty".into(),
            ));
        };

        if first.is_ascii_digit() {
            return Err(TypeError::InvalidGuardSymbol(format!(
                "'{symbol}' cannot start with a digit"
            )));
        }

        if let Some(bad) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(TypeError::InvalidGuardSymbol(format!(
                "'{symbol}' contains invalid character '{bad}'"
            )));
        }

        Ok(())
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GuardSymbol {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<GuardSymbol> for String {
    fn from(symbol: GuardSymbol) -> Self {
        symbol.0
    }
}

impl std::fmt::Display for GuardSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated file name for a quoted `#include` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IncludeName(String);

impl IncludeName {
    /// Header the internal header pulls in unless configured otherwise.
    pub const DEFAULT_INTERNAL: &'static str = "p_data.h";

    /// Create a new validated include name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidIncludeName` if the name is empty or would
    /// break out of the quoted include.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TypeError::InvalidIncludeName(
                "include name cannot be empty".into(),
            ));
        }
        if name.contains('"') || name.contains('\n') || name.contains('\r') {
            return Err(TypeError::InvalidIncludeName(format!(
                "'{}' cannot contain quotes or line breaks",
                name.escape_debug()
            )));
        }
        Ok(Self(name))
    }

    /// The default include list for the given header.
    pub fn defaults_for(sink: Sink) -> Vec<Self> {
        match sink {
            Sink::Internal => vec![Self(Self::DEFAULT_INTERNAL.to_string())],
            Sink::Public => Vec::new(),
        }
    }

    /// Get the include name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IncludeName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<IncludeName> for String {
    fn from(name: IncludeName) -> Self {
        name.0
    }
}

impl std::fmt::Display for IncludeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 content hash of a generated header.
///
/// The banner line records the invoking command line, so it is excluded
/// from the hash. Two runs over the same schema with different command
/// lines produce the same fingerprint.
///
/// # Example
///
/// ```
/// use makedmt::core::types::Fingerprint;
///
/// let a = Fingerprint::of_document(b"/* Generated by a */\n\n#endif\n");
/// let b = Fingerprint::of_document(b"/* Generated by b c */\n\n#endif\n");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash a generated document, skipping its banner line.
    pub fn of_document(contents: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(strip_banner(contents));
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get an abbreviated form for display.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything after the first line of a document.
pub fn strip_banner(contents: &[u8]) -> &[u8] {
    match contents.iter().position(|&b| b == b'\n') {
        Some(end) => &contents[end + 1..],
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sink {
        use super::*;

        #[test]
        fn keywords_roundtrip() {
            for sink in Sink::ALL {
                assert_eq!(Sink::from_keyword(sink.keyword()), Some(sink));
            }
        }

        #[test]
        fn keywords_are_case_sensitive() {
            assert_eq!(Sink::from_keyword("Internal"), None);
            assert_eq!(Sink::from_keyword("PUBLIC"), None);
        }

        #[test]
        fn serializes_lowercase() {
            let json = serde_json::to_string(&Sink::Public).unwrap();
            assert_eq!(json, "\"public\"");
        }
    }

    mod guard_symbol {
        use super::*;

        #[test]
        fn accepts_identifiers() {
            assert!(GuardSymbol::new("__FOO_H__").is_ok());
            assert!(GuardSymbol::new("foo1").is_ok());
            assert!(GuardSymbol::new("_").is_ok());
        }

        #[test]
        fn rejects_empty() {
            assert!(GuardSymbol::new("").is_err());
        }

        #[test]
        fn rejects_leading_digit() {
            assert!(GuardSymbol::new("9LIVES").is_err());
        }

        #[test]
        fn rejects_punctuation() {
            assert!(GuardSymbol::new("FOO-H").is_err());
            assert!(GuardSymbol::new("FOO H").is_err());
            assert!(GuardSymbol::new("FOO.H").is_err());
        }

        #[test]
        fn defaults_are_valid() {
            for sink in Sink::ALL {
                let guard = GuardSymbol::default_for(sink);
                assert!(GuardSymbol::new(guard.as_str()).is_ok());
            }
        }

        #[test]
        fn deserialize_validates() {
            let result: Result<GuardSymbol, _> = serde_json::from_str("\"1X\"");
            assert!(result.is_err());
        }
    }

    mod include_name {
        use super::*;

        #[test]
        fn accepts_paths() {
            assert!(IncludeName::new("p_data.h").is_ok());
            assert!(IncludeName::new("engine/p_data.h").is_ok());
        }

        #[test]
        fn rejects_blank() {
            assert!(IncludeName::new("").is_err());
            assert!(IncludeName::new("   ").is_err());
        }

        #[test]
        fn rejects_quote_and_newline() {
            assert!(IncludeName::new("a\"b").is_err());
            assert!(IncludeName::new("a\nb").is_err());
        }

        #[test]
        fn public_defaults_empty() {
            assert!(IncludeName::defaults_for(Sink::Public).is_empty());
            assert_eq!(IncludeName::defaults_for(Sink::Internal).len(), 1);
        }
    }

    mod fingerprint {
        use super::*;

        #[test]
        fn ignores_banner() {
            let a = Fingerprint::of_document(b"/* one */\nbody\n");
            let b = Fingerprint::of_document(b"/* two */\nbody\n");
            assert_eq!(a, b);
        }

        #[test]
        fn detects_body_change() {
            let a = Fingerprint::of_document(b"/* one */\nbody\n");
            let b = Fingerprint::of_document(b"/* one */\nbody2\n");
            assert_ne!(a, b);
        }

        #[test]
        fn short_is_prefix() {
            let fp = Fingerprint::of_document(b"x\ny\n");
            assert!(fp.as_str().starts_with(fp.short()));
            assert_eq!(fp.short().len(), 12);
        }

        #[test]
        fn strip_banner_without_newline_is_empty() {
            assert_eq!(strip_banner(b"no newline"), b"");
        }
    }
}
