//! Core types, configuration, and utilities for QuickNotes.
//!
//! - [`config`]: environment-driven configuration (server + provider credentials)
//! - [`types`]: OpenAI-format chat completion wire types
//! - [`utils`]: small string helpers shared by the other crates

pub mod config;
pub mod types;
pub mod utils;
