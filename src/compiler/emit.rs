//! compiler::emit
//!
//! Output sinks for the two generated headers.
//!
//! # Design
//!
//! Each header is written through an [`Emitter`] wrapping any
//! [`std::io::Write`]. The engine hands in locked files; tests hand in
//! `Vec<u8>`. Lines are written once, in order, and never revisited.
//!
//! # Comment Alignment
//!
//! A trailing schema comment is carried over to the generated line and
//! starts at column [`COMMENT_COLUMN`]. Longer lines get a single space.

use std::io::Write;

use super::error::CompileError;
use crate::core::types::Sink;

/// Column (in characters) where carried-over comments start.
pub const COMMENT_COLUMN: usize = 39;

/// Append a comment to `text`, aligned to [`COMMENT_COLUMN`].
///
/// Width is measured in characters over the whole of `text`, including any
/// embedded newline.
///
/// # Example
///
/// ```
/// use makedmt::compiler::emit::align_comment;
///
/// assert_eq!(align_comment("int x;", None), "int x;");
/// let aligned = align_comment("int x;", Some("// note"));
/// assert_eq!(aligned.find("//"), Some(39));
/// ```
pub fn align_comment(text: &str, comment: Option<&str>) -> String {
    let Some(comment) = comment else {
        return text.to_string();
    };

    let width = text.chars().count();
    let padding = if width < COMMENT_COLUMN {
        COMMENT_COLUMN - width
    } else {
        1
    };

    let mut line = String::with_capacity(text.len() + padding + comment.len());
    line.push_str(text);
    line.extend(std::iter::repeat(' ').take(padding));
    line.push_str(comment);
    line
}

/// Line-oriented writer for one generated header.
#[derive(Debug)]
pub struct Emitter<W> {
    sink: Sink,
    writer: W,
}

impl<W: Write> Emitter<W> {
    /// Wrap a writer for the given header.
    pub fn new(sink: Sink, writer: W) -> Self {
        Self { sink, writer }
    }

    /// Which header this emitter writes.
    pub fn sink(&self) -> Sink {
        self.sink
    }

    /// Write `text` followed by a newline.
    pub fn line(&mut self, text: &str) -> Result<(), CompileError> {
        self.commented(text, None)
    }

    /// Write `text` with an aligned trailing comment, followed by a newline.
    pub fn commented(&mut self, text: &str, comment: Option<&str>) -> Result<(), CompileError> {
        let line = align_comment(text, comment);
        self.raw(&line)?;
        self.raw("\n")
    }

    /// Write text exactly as given.
    pub fn raw(&mut self, text: &str) -> Result<(), CompileError> {
        let sink = self.sink;
        self.writer
            .write_all(text.as_bytes())
            .map_err(|source| CompileError::Write { sink, source })
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> Result<(), CompileError> {
        let sink = self.sink;
        self.writer
            .flush()
            .map_err(|source| CompileError::Write { sink, source })
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// The pair of header emitters the interpreter writes into.
#[derive(Debug)]
pub struct Outputs<I, P> {
    pub internal: Emitter<I>,
    pub public: Emitter<P>,
}

impl<I: Write, P: Write> Outputs<I, P> {
    /// Wrap the internal and public header writers.
    pub fn new(internal: I, public: P) -> Self {
        Self {
            internal: Emitter::new(Sink::Internal, internal),
            public: Emitter::new(Sink::Public, public),
        }
    }

    /// Write an aligned line to the header selected by `sink`.
    pub fn commented(
        &mut self,
        sink: Sink,
        text: &str,
        comment: Option<&str>,
    ) -> Result<(), CompileError> {
        match sink {
            Sink::Internal => self.internal.commented(text, comment),
            Sink::Public => self.public.commented(text, comment),
        }
    }

    /// Write a plain line to the header selected by `sink`.
    pub fn line(&mut self, sink: Sink, text: &str) -> Result<(), CompileError> {
        self.commented(sink, text, None)
    }

    /// Write raw text to the header selected by `sink`.
    pub fn raw(&mut self, sink: Sink, text: &str) -> Result<(), CompileError> {
        match sink {
            Sink::Internal => self.internal.raw(text),
            Sink::Public => self.public.raw(text),
        }
    }

    /// Flush both headers.
    pub fn flush(&mut self) -> Result<(), CompileError> {
        self.internal.flush()?;
        self.public.flush()
    }

    /// Recover both writers as `(internal, public)`.
    pub fn into_inner(self) -> (I, P) {
        (self.internal.into_inner(), self.public.into_inner())
    }
}

impl Outputs<Vec<u8>, Vec<u8>> {
    /// In-memory outputs.
    pub fn in_memory() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_comment_leaves_text_alone() {
        assert_eq!(align_comment("    int x;", None), "    int x;");
    }

    #[test]
    fn short_line_padded_to_column() {
        let line = align_comment("typedef struct seg_s {", Some("// Segment"));
        assert_eq!(line.len(), COMMENT_COLUMN + "// Segment".len());
        assert!(line[22..COMMENT_COLUMN].chars().all(|c| c == ' '));
    }

    #[test]
    fn long_line_gets_single_space() {
        let text = "x".repeat(COMMENT_COLUMN);
        assert_eq!(align_comment(&text, Some("//c")), format!("{text} //c"));

        let longer = "y".repeat(50);
        assert_eq!(align_comment(&longer, Some("//c")), format!("{longer} //c"));
    }

    #[test]
    fn empty_line_with_comment() {
        let line = align_comment("", Some("// tail"));
        assert_eq!(line, format!("{}// tail", " ".repeat(COMMENT_COLUMN)));
    }

    #[test]
    fn width_counts_embedded_newline() {
        let line = align_comment("} a_t;\n", Some("//c"));
        assert_eq!(line, format!("}} a_t;\n{}//c", " ".repeat(COMMENT_COLUMN - 7)));
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let line = align_comment("é", Some("//c"));
        assert_eq!(line.chars().position(|c| c == '/'), Some(COMMENT_COLUMN));
    }

    #[test]
    fn emitter_terminates_lines_but_not_raw_text() {
        let mut emitter = Emitter::new(Sink::Internal, Vec::new());
        emitter.line("a").unwrap();
        emitter.commented("b", Some("// c")).unwrap();
        emitter.raw("not a line").unwrap();
        assert_eq!(emitter.sink(), Sink::Internal);

        let written = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(written, format!("a\nb{}// c\nnot a line", " ".repeat(COMMENT_COLUMN - 1)));
    }

    #[test]
    fn outputs_route_by_sink() {
        let mut out = Outputs::in_memory();
        out.line(Sink::Internal, "in").unwrap();
        out.line(Sink::Public, "pub").unwrap();
        out.flush().unwrap();

        let (internal, public) = out.into_inner();
        assert_eq!(internal, b"in\n");
        assert_eq!(public, b"pub\n");
    }

    #[test]
    fn write_failure_reports_sink() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "broken"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut out = Outputs::new(Vec::new(), Broken);
        assert!(out.line(Sink::Internal, "ok").is_ok());
        let err = out.line(Sink::Public, "fails").unwrap_err();
        assert!(matches!(err, CompileError::Write { sink: Sink::Public, .. }));
    }
}
