//! Configuration schema definitions and loading.
//!
//! Defines the configuration structure for fusedloc: general settings such
//! as logging, and how the client reaches the location service. All
//! configurations are serializable to/from TOML format.

mod client;
mod general;
mod loading;
mod paths;

#[cfg(test)]
mod tests;

pub use client::{BusKind, ClientConfig};
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;

use serde::{Deserialize, Serialize};

/// Main configuration structure for fusedloc.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Location service client settings.
    #[serde(default)]
    pub client: ClientConfig,
}
