#![allow(missing_docs)]

use zbus::{Result, proxy, zvariant::OwnedFd};

/// FusedLocation server interface proxy
///
/// Method names keep the service's camelCase spelling on the wire.
#[proxy(
    interface = "org.tizen.lbs.Providers.FusedLocation.Server",
    default_service = "org.tizen.lbs.Providers.FusedLocation",
    default_path = "/org/tizen/lbs/Providers/FusedLocation"
)]
pub trait FusedLocationServer {
    /// Register the calling connection as a location client
    #[zbus(name = "registerClient")]
    fn register_client(&self) -> Result<()>;

    /// Diagnostic round-trip, answers with a message text
    #[zbus(name = "echo")]
    fn echo(&self, message: &str) -> Result<String>;

    /// Set desired accuracy level (0 = no power, 1 = balanced, 2 = high)
    #[zbus(name = "setAccuracy")]
    fn set_accuracy(&self, level: u32) -> Result<()>;

    /// Set desired update interval in milliseconds
    #[zbus(name = "setDesiredInterval")]
    fn set_desired_interval(&self, interval: u32) -> Result<()>;

    /// Subscribe with a minimal update interval in milliseconds; returns the
    /// file descriptor position records are written to
    #[zbus(name = "subscribe")]
    fn subscribe(&self, interval: u32) -> Result<OwnedFd>;
}
