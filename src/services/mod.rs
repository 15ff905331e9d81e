/// FusedLocation provider client
pub mod fused_location;

pub use fused_location::{
    AccuracyLevel, Destination, FusedLocationClient, FusedLocationError, Interval, Position,
    PositionUpdates, ServiceProxy,
};
