//! compiler::line
//!
//! Line classification.
//!
//! Turns one raw schema line into a [`Directive`]: whitespace-separated
//! tokens plus the optional `//` comment that followed them. Blank lines and
//! `#` comment lines produce nothing.

/// A tokenized schema line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Tokens before the trailing comment.
    pub tokens: Vec<&'a str>,
    /// Trailing comment, starting at `//`.
    pub comment: Option<&'a str>,
}

impl<'a> Directive<'a> {
    /// Number of tokens, which selects the directive shape.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when only a comment (or nothing) remained after stripping.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The single token, if the line has exactly one.
    pub fn single(&self) -> Option<&'a str> {
        match self.tokens.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// Classify a raw line.
///
/// Returns `None` for lines that are empty after trimming or whose first
/// character is `#`. A line holding only a `//` comment yields a directive
/// with zero tokens; whether that is legal is up to the interpreter.
///
/// # Example
///
/// ```
/// use makedmt::compiler::line::classify;
///
/// let d = classify("  fixed fixed_t x   // X coordinate").unwrap();
/// assert_eq!(d.tokens, vec!["fixed", "fixed_t", "x"]);
/// assert_eq!(d.comment, Some("// X coordinate"));
///
/// assert!(classify("# a comment").is_none());
/// assert!(classify("   ").is_none());
/// ```
pub fn classify(raw: &str) -> Option<Directive<'_>> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (body, comment) = match line.find("//") {
        Some(index) => (&line[..index], Some(&line[index..])),
        None => (line, None),
    };

    Some(Directive {
        tokens: body.split_whitespace().collect(),
        comment,
    })
}
