//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output sinks, verbosity and message helpers
//!
//! # Design
//!
//! All user-facing output goes through this module to ensure consistent
//! formatting and proper handling of quiet vs normal modes.

pub mod output;

pub use output::{BufferSink, OutputSink, TerminalSink, Verbosity};
