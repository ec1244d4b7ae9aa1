//! core
//!
//! Core schemas and loading for devai.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Schemas are strict and self-describing
//! - Invalid values are rejected at load time, not at use

pub mod config;
