//! fusedloc - client for the FusedLocation provider service.
//!
//! The provider publishes position fixes to registered clients over the
//! local message bus. This crate binds its server interface to typed call
//! sites:
//!
//! - Async client built on zbus proxies
//! - Blocking proxy for synchronous callers
//! - Position update stream decoding
//! - TOML configuration and a command-line tool
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fusedloc::{config::ClientConfig, services::{AccuracyLevel, ServiceProxy}};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let proxy = ServiceProxy::connect(&ClientConfig::default())?;
//!
//! proxy.register_client()?;
//! proxy.set_accuracy(AccuracyLevel::HighAccuracy)?;
//! println!("{}", proxy.echo("ping")?);
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface for the location service.
pub mod cli;

/// Clients for system services.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{AppError, Result};
