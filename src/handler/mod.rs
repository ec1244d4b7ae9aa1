//! handler
//!
//! Abstraction over the AI backend that performs the work behind the `ai`
//! commands.
//!
//! # Architecture
//!
//! The `AiHandler` trait defines the interface. Commands use the
//! [`create_handler`] factory rather than constructing implementations
//! directly.
//!
//! - Handlers own all filesystem and network effects
//! - Handler errors are reported to the user untranslated
//!
//! # Modules
//!
//! - `traits`: Core `AiHandler` trait, `PromptRequest` and `AiError`
//! - [`http`]: Implementation talking to an orchestration service
//! - [`mock`]: Mock implementation for deterministic testing
//! - `factory`: Handler selection from configuration

mod factory;
pub mod http;
pub mod mock;
mod traits;

pub use factory::{create_handler, unavailable_handler};
pub use traits::*;
