//! devai - AI-assisted changes to a project's README and source tree
//!
//! devai is a single-binary tool exposing an `ai` command group. Each
//! sub-command is validated and forwarded to an AI handler, which builds the
//! prompt, calls the language model and merges the answer into the project.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, wires collaborators)
//! - [`dispatch`] - Maps `ai` sub-commands onto handler calls
//! - [`handler`] - Abstraction over the AI backend (HTTP service, mock)
//! - [`core`] - Configuration schema and loading
//! - [`ui`] - Output sinks and message helpers
//!
//! # Invariants
//!
//! 1. `ai add` and `ai prompt` never reach the handler without a description
//! 2. Handler errors reach the user untranslated
//! 3. A failing help lookup never fails a command

pub mod cli;
pub mod core;
pub mod dispatch;
pub mod handler;
pub mod ui;
