//! compiler::interpreter
//!
//! The directive state machine.
//!
//! # States
//!
//! ```text
//! Idle ── internal|public ──> Verbatim(sink) ── end ──> Idle
//!  │
//!  └── struct <name> ──> InStruct(name) ── end ──> Idle
//!                          │
//!                          └── <tag> <type> <field> (stays)
//! ```
//!
//! [`step`] is a pure transition over an explicit [`ParserState`]: it takes
//! the current state and one raw line, writes to the outputs, and returns the
//! next state. [`Interpreter`] threads that state across a whole input and
//! frames the headers.
//!
//! # Quirks
//!
//! - In `Idle`, an unknown single token, or a two-token line not starting
//!   with `struct`, is ignored rather than rejected.
//! - Input may end in any state. The guards are closed regardless.

use std::io::Write;

use super::document::DocumentLayout;
use super::emit::Outputs;
use super::error::{CompileError, SyntaxCause};
use super::fields::FieldDecl;
use super::line::{self, Directive};
use crate::core::naming;
use crate::core::types::Sink;

/// Keyword closing a struct or verbatim block.
pub const END_KEYWORD: &str = "end";

/// Member every generated struct starts with.
pub const HEADER_MEMBER: &str = "    runtime_mapdata_header_t header;";

/// Where the interpreter is within the schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Between blocks.
    #[default]
    Idle,
    /// Copying raw lines into a header until `end`.
    Verbatim(Sink),
    /// Collecting fields of the named struct.
    InStruct(String),
}

impl ParserState {
    /// Check if no block is open.
    pub fn is_idle(&self) -> bool {
        matches!(self, ParserState::Idle)
    }
}

impl std::fmt::Display for ParserState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserState::Idle => write!(f, "idle"),
            ParserState::Verbatim(sink) => write!(f, "verbatim block ({sink})"),
            ParserState::InStruct(name) => write!(f, "struct {name}"),
        }
    }
}

/// What a line did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Blank or `#` comment line.
    Skipped,
    /// Line accepted but without effect.
    Ignored,
    VerbatimOpened(Sink),
    VerbatimLine(Sink),
    VerbatimClosed(Sink),
    StructOpened,
    /// A field was declared; `public` tells whether an accessor was written.
    Field { public: bool },
    StructClosed,
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: ParserState,
    pub event: Event,
}

impl Step {
    fn new(next: ParserState, event: Event) -> Self {
        Self { next, event }
    }
}

/// Process one raw input line.
///
/// # Errors
///
/// Returns `CompileError::Syntax` if the line is not valid in `state`, or
/// `CompileError::Write` if an output cannot be written.
///
/// # Example
///
/// ```
/// use makedmt::compiler::emit::Outputs;
/// use makedmt::compiler::interpreter::{step, ParserState};
///
/// let mut out = Outputs::in_memory();
/// let step = step(ParserState::Idle, "struct vertex", &mut out).unwrap();
/// assert_eq!(step.next, ParserState::InStruct("vertex".into()));
/// ```
pub fn step<I: Write, P: Write>(
    state: ParserState,
    raw: &str,
    out: &mut Outputs<I, P>,
) -> Result<Step, CompileError> {
    match state {
        ParserState::Verbatim(sink) => verbatim(sink, raw, out),
        ParserState::Idle => match line::classify(raw) {
            Some(directive) => idle(raw, &directive, out),
            None => Ok(Step::new(ParserState::Idle, Event::Skipped)),
        },
        ParserState::InStruct(name) => match line::classify(raw) {
            Some(directive) => in_struct(name, raw, &directive, out),
            None => Ok(Step::new(ParserState::InStruct(name), Event::Skipped)),
        },
    }
}

fn verbatim<I: Write, P: Write>(
    sink: Sink,
    raw: &str,
    out: &mut Outputs<I, P>,
) -> Result<Step, CompileError> {
    let text = raw.trim_end();
    if text == END_KEYWORD {
        out.line(sink, "")?;
        return Ok(Step::new(ParserState::Idle, Event::VerbatimClosed(sink)));
    }

    out.line(sink, text)?;
    Ok(Step::new(ParserState::Verbatim(sink), Event::VerbatimLine(sink)))
}

fn idle<I: Write, P: Write>(
    raw: &str,
    directive: &Directive<'_>,
    out: &mut Outputs<I, P>,
) -> Result<Step, CompileError> {
    match directive.tokens.as_slice() {
        [keyword] => Ok(match Sink::from_keyword(keyword) {
            Some(sink) => Step::new(ParserState::Verbatim(sink), Event::VerbatimOpened(sink)),
            None => Step::new(ParserState::Idle, Event::Ignored),
        }),
        ["struct", name] => {
            let open = format!("typedef struct {} {{", naming::struct_tag(name));
            out.internal.commented(&open, directive.comment)?;
            out.internal.line(HEADER_MEMBER)?;
            Ok(Step::new(
                ParserState::InStruct((*name).to_string()),
                Event::StructOpened,
            ))
        }
        [_, _] => Ok(Step::new(ParserState::Idle, Event::Ignored)),
        _ => Err(CompileError::syntax(raw, SyntaxCause::Malformed)),
    }
}

fn in_struct<I: Write, P: Write>(
    name: String,
    raw: &str,
    directive: &Directive<'_>,
    out: &mut Outputs<I, P>,
) -> Result<Step, CompileError> {
    if let Some(field) = FieldDecl::from_tokens(&directive.tokens) {
        let accessor = field.accessor(&name);
        if let Some(accessor) = &accessor {
            out.public.commented(accessor, directive.comment)?;
        }
        out.internal.commented(&field.member_line(), directive.comment)?;
        return Ok(Step::new(
            ParserState::InStruct(name),
            Event::Field {
                public: accessor.is_some(),
            },
        ));
    }

    match directive.single() {
        Some(END_KEYWORD) => {
            // The blank line after the typedef carries the comment.
            let close = format!("}} {};\n", naming::typedef_name(&name));
            out.internal.commented(&close, directive.comment)?;
            out.public.commented("", directive.comment)?;
            Ok(Step::new(ParserState::Idle, Event::StructClosed))
        }
        Some(_) => Err(CompileError::syntax(raw, SyntaxCause::Malformed)),
        None => Err(CompileError::syntax(raw, SyntaxCause::UnknownDefinition(name))),
    }
}

/// Counters gathered over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Input lines read.
    pub lines: usize,
    pub structs: usize,
    pub fields: usize,
    /// Fields that produced a public accessor.
    pub accessors: usize,
    /// Raw lines copied from verbatim blocks.
    pub verbatim_lines: usize,
}

impl Stats {
    fn record(&mut self, event: Event) {
        self.lines += 1;
        match event {
            Event::StructOpened => self.structs += 1,
            Event::Field { public } => {
                self.fields += 1;
                if public {
                    self.accessors += 1;
                }
            }
            Event::VerbatimLine(_) => self.verbatim_lines += 1,
            Event::Skipped
            | Event::Ignored
            | Event::VerbatimOpened(_)
            | Event::VerbatimClosed(_)
            | Event::StructClosed => {}
        }
    }
}

/// A finished run.
#[derive(Debug)]
pub struct Compiled<I, P> {
    pub outputs: Outputs<I, P>,
    pub stats: Stats,
    /// State at end of input; anything but `Idle` means an unterminated block.
    pub final_state: ParserState,
}

/// Drives [`step`] over a sequence of lines and frames both headers.
#[derive(Debug)]
pub struct Interpreter<'a, I, P> {
    layout: &'a DocumentLayout,
    state: ParserState,
    outputs: Outputs<I, P>,
    stats: Stats,
}

impl<'a, I: Write, P: Write> Interpreter<'a, I, P> {
    /// Write the prologue of both headers and start in `Idle`.
    pub fn start(
        layout: &'a DocumentLayout,
        mut outputs: Outputs<I, P>,
    ) -> Result<Self, CompileError> {
        layout.write_prologue(&mut outputs)?;
        Ok(Self {
            layout,
            state: ParserState::Idle,
            outputs,
            stats: Stats::default(),
        })
    }

    /// Current state.
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Counters so far.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Process one raw line.
    ///
    /// After an error the interpreter is back in `Idle` and should be
    /// abandoned; nothing already written is undone.
    pub fn feed(&mut self, raw: &str) -> Result<Event, CompileError> {
        let state = std::mem::take(&mut self.state);
        let Step { next, event } = step(state, raw, &mut self.outputs)?;
        self.state = next;
        self.stats.record(event);
        Ok(event)
    }

    /// Flush whatever was written so far, keeping partial output.
    ///
    /// A failed flush is handed back next to the outputs rather than
    /// replacing the error that caused the abandon.
    pub fn abandon(mut self) -> (Outputs<I, P>, Option<CompileError>) {
        let flushed = self.outputs.flush().err();
        (self.outputs, flushed)
    }

    /// Close both include guards and flush.
    pub fn finish(mut self) -> Result<Compiled<I, P>, CompileError> {
        self.layout.write_epilogue(&mut self.outputs)?;
        self.outputs.flush()?;
        Ok(Compiled {
            outputs: self.outputs,
            stats: self.stats,
            final_state: self.state,
        })
    }
}
