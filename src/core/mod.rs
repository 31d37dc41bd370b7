//! core
//!
//! Core domain types and configuration for makedmt.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Sink, GuardSymbol, IncludeName, Fingerprint
//! - [`naming`] - Naming rules for generated C identifiers
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing keeps invalid header framing out of the generator
//! - Schemas are strict and self-describing
//! - Generation is deterministic

pub mod config;
pub mod naming;
pub mod types;
