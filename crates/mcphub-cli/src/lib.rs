//! CLI adapter for the MCP tool catalog.
//!
//! Exposes the parser, command definitions, bootstrap, and handlers so the
//! binary stays a thin dispatch layer.
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, ServerCommand, ToolCommand};
pub use parser::Cli;
