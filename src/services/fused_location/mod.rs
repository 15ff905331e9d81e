//! Client for the FusedLocation provider service.
//!
//! The provider exposes a small fixed interface on the message bus. This
//! module binds it to typed call sites, in an async flavour
//! ([`FusedLocationClient`]) and a blocking one ([`ServiceProxy`]), both
//! generated from the same [`FusedLocationServer`] interface definition.

/// Synchronous proxy
pub mod blocking;
/// Async client and connection helpers
pub mod client;
/// Error types
pub mod error;
/// Position records and the update stream
pub mod position;
/// D-Bus proxy trait definitions
pub mod proxy;
/// Argument types and destinations
pub mod types;

pub use blocking::ServiceProxy;
pub use client::FusedLocationClient;
pub use error::FusedLocationError;
pub use position::{Position, PositionUpdates, RECORD_SIZE};
pub use proxy::*;
pub use types::{AccuracyLevel, Destination, Interval};

/// Well-known bus name of the FusedLocation provider.
pub const SERVICE_NAME: &str = "org.tizen.lbs.Providers.FusedLocation";

/// Object path the provider serves its interface at.
pub const OBJECT_PATH: &str = "/org/tizen/lbs/Providers/FusedLocation";

/// Server interface implemented by the provider.
pub const INTERFACE_NAME: &str = "org.tizen.lbs.Providers.FusedLocation.Server";
