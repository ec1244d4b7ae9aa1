//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! User-facing text goes through an [`OutputSink`] so that handlers and the
//! dispatcher never write to the terminal directly. [`TerminalSink`] is the
//! production sink; [`BufferSink`] captures everything for tests. The free
//! functions below are for the CLI layer's own messages and respect the
//! quiet flag where noted.

use std::fmt::Display;
use std::sync::{Arc, Mutex};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Destination for user-facing text.
///
/// Implementations must be thread-safe so a single sink can be shared
/// between the dispatcher and the handler it delegates to.
pub trait OutputSink: Send + Sync {
    /// Write one block of text followed by a newline.
    fn print(&self, text: &str);
}

/// Sink that writes to stdout.
///
/// Sink output is never suppressed by `--quiet`: it carries diagnostics and
/// the handler's progress, which the user asked for by running the command.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl OutputSink for TerminalSink {
    fn print(&self, text: &str) {
        result(text);
    }
}

/// Sink that records every line in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines printed so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Everything printed so far joined with newlines.
    pub fn contents(&self) -> String {
        self.lines().join("\n")
    }
}

impl OutputSink for BufferSink {
    fn print(&self, text: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(text.to_string());
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a command result. Always shown, even in quiet mode.
pub fn result(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}
