//! compiler
//!
//! Schema-to-header compilation.
//!
//! # Pipeline
//!
//! ```text
//! lines ──> line::classify ──> interpreter::step ──> emit::Outputs
//!                                   │                 ├─ internal header
//!                                   │                 └─ public header
//!                               ParserState
//! ```
//!
//! There is no syntax tree. Each line is classified, dispatched on the
//! current [`ParserState`], and turned into output immediately. The first
//! syntax error stops the run; lines already written stay written.
//!
//! # Modules
//!
//! - [`line`] - Tokenizing and comment stripping
//! - [`interpreter`] - The directive state machine
//! - [`fields`] - Member and accessor formatting
//! - [`emit`] - Header writers and comment alignment
//! - [`document`] - Banner, include guards, includes
//! - [`error`] - Compile errors
//!
//! # Example
//!
//! ```
//! use makedmt::compiler::{compile_in_memory, DocumentLayout};
//!
//! let layout = DocumentLayout::new("makedmt");
//! let generated = compile_in_memory("struct Foo\nt int x\nend\n".as_bytes(), &layout).unwrap();
//!
//! assert!(generated.internal.contains("typedef struct Foo_s {"));
//! assert!(generated.public.contains("#define DMT_FOO_X DDVT_T"));
//! ```

pub mod document;
pub mod emit;
pub mod error;
pub mod fields;
pub mod interpreter;
pub mod line;

pub use document::{DocumentLayout, HeaderLayout};
pub use emit::{Emitter, Outputs};
pub use error::{CompileError, SyntaxCause};
pub use interpreter::{step, Compiled, Event, Interpreter, ParserState, Stats, Step};

use std::borrow::Cow;
use std::io::{BufRead, Write};

use crate::core::types::Sink;
use crate::ui::output::{self, Verbosity};

/// Compile a schema from `input` into `outputs`.
///
/// Lines are processed as they are read. Bytes that are not valid UTF-8
/// are replaced with U+FFFD. On a syntax error the outputs are flushed as
/// they stand and the error is returned; a failure of that last flush is
/// logged at debug level.
///
/// # Errors
///
/// Returns `CompileError::Syntax` on the first invalid line,
/// `CompileError::Read` if the input cannot be read, or
/// `CompileError::Write` if an output cannot be written.
pub fn compile<R, I, P>(
    mut input: R,
    layout: &DocumentLayout,
    outputs: Outputs<I, P>,
    verbosity: Verbosity,
) -> Result<Compiled<I, P>, CompileError>
where
    R: BufRead,
    I: Write,
    P: Write,
{
    let mut interpreter = Interpreter::start(layout, outputs)?;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let result = match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => interpreter.feed(&decode_line(&buf)),
            Err(err) => Err(CompileError::Read(err)),
        };

        if let Err(err) = result {
            let (_, flush_error) = interpreter.abandon();
            if let Some(flush_error) = flush_error {
                output::debug(format!("flush after abort failed: {flush_error}"), verbosity);
            }
            return Err(err);
        }
    }

    interpreter.finish()
}

/// Strip the line terminator (`\n` or `\r\n`) and decode lossily.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

/// Both headers generated into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub internal: String,
    pub public: String,
    pub stats: Stats,
    pub final_state: ParserState,
}

impl Generated {
    /// Contents of the given header.
    pub fn document(&self, sink: Sink) -> &str {
        match sink {
            Sink::Internal => &self.internal,
            Sink::Public => &self.public,
        }
    }
}

/// Compile a schema into a pair of strings.
///
/// # Errors
///
/// Same as [`compile`].
pub fn compile_in_memory<R: BufRead>(
    input: R,
    layout: &DocumentLayout,
) -> Result<Generated, CompileError> {
    let compiled = compile(input, layout, Outputs::in_memory(), Verbosity::Quiet)?;
    let (internal, public) = compiled.outputs.into_inner();

    // Emitters only ever receive `&str`, so the buffers are valid UTF-8.
    Ok(Generated {
        internal: String::from_utf8_lossy(&internal).into_owned(),
        public: String::from_utf8_lossy(&public).into_owned(),
        stats: compiled.stats,
        final_state: compiled.final_state,
    })
}
