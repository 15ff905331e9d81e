use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Which message bus the location service lives on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    /// Per-login session bus.
    #[default]
    Session,

    /// System-wide bus, where the provider daemon runs in production builds.
    System,
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusKind::Session => write!(f, "session"),
            BusKind::System => write!(f, "system"),
        }
    }
}

/// Settings for reaching the FusedLocation service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClientConfig {
    /// Bus to connect to.
    #[serde(default)]
    pub bus: BusKind,

    /// Reply timeout for remote calls in milliseconds.
    ///
    /// Unset keeps the bus library's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_timeout_ms: Option<u64>,
}

impl ClientConfig {
    /// Reply timeout for remote calls, if one is configured.
    pub fn method_timeout(&self) -> Option<Duration> {
        self.method_timeout_ms.map(Duration::from_millis)
    }
}
