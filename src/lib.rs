//! makedmt - generate the map data type headers
//!
//! makedmt reads a small line-oriented schema describing map data structs
//! and writes two C headers from it: an internal header with the full
//! struct layouts and a public header with one accessor macro per public
//! field.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Configure → Open → Compile → Report
//! - [`compiler`] - Line classifier, directive state machine, emitters
//! - [`core`] - Domain types, naming rules, configuration
//! - [`ui`] - Output formatting and verbosity
//!
//! # Correctness Invariants
//!
//! 1. Identical input and settings produce byte-identical headers
//! 2. Fields tagged `-` never reach the public header
//! 3. The first invalid line stops the run; nothing written before it is undone

pub mod cli;
pub mod compiler;
pub mod core;
pub mod engine;
pub mod ui;
