//! Command-line interface for the location service.
//!
//! Provides a hierarchical command system for poking at the FusedLocation
//! provider by hand. Commands are organized by category and generate their
//! help text from metadata.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{ArgType, CliError, Command, CommandArg, CommandMetadata, CommandResult};
