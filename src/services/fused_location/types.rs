use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use super::{FusedLocationError, INTERFACE_NAME, OBJECT_PATH, SERVICE_NAME};

/// Accuracy mode requested from the location provider.
///
/// Higher accuracy trades off against power consumption. Sent on the wire
/// as its numeric discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AccuracyLevel {
    /// No strict requirement, only occasional updates.
    NoPower = 0,

    /// Balance between accuracy and power consumption.
    #[default]
    BalancedPower = 1,

    /// Highest accuracy and power consumption.
    HighAccuracy = 2,
}

impl AccuracyLevel {
    /// Every level, in wire order.
    pub const ALL: [AccuracyLevel; 3] = [
        AccuracyLevel::NoPower,
        AccuracyLevel::BalancedPower,
        AccuracyLevel::HighAccuracy,
    ];
}

impl From<AccuracyLevel> for u32 {
    fn from(level: AccuracyLevel) -> Self {
        level as u32
    }
}

impl TryFrom<u32> for AccuracyLevel {
    type Error = FusedLocationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AccuracyLevel::NoPower),
            1 => Ok(AccuracyLevel::BalancedPower),
            2 => Ok(AccuracyLevel::HighAccuracy),
            _ => Err(FusedLocationError::InvalidArgument {
                arg: "level",
                reason: format!("accuracy level must be 0, 1 or 2, got {value}"),
            }),
        }
    }
}

impl FromStr for AccuracyLevel {
    type Err = FusedLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no-power" | "nopower" | "low" => Ok(AccuracyLevel::NoPower),
            "balanced" | "balanced-power" => Ok(AccuracyLevel::BalancedPower),
            "high" | "high-accuracy" => Ok(AccuracyLevel::HighAccuracy),
            other => {
                let value = other
                    .parse::<u32>()
                    .map_err(|_| FusedLocationError::InvalidArgument {
                        arg: "level",
                        reason: format!(
                            "unknown accuracy level '{s}', expected no-power, balanced or high"
                        ),
                    })?;
                AccuracyLevel::try_from(value)
            }
        }
    }
}

impl fmt::Display for AccuracyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccuracyLevel::NoPower => write!(f, "no-power"),
            AccuracyLevel::BalancedPower => write!(f, "balanced"),
            AccuracyLevel::HighAccuracy => write!(f, "high"),
        }
    }
}

/// Update interval in milliseconds, as the service expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(u32);

impl Interval {
    /// Creates an interval of `millis` milliseconds.
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    /// Interval length in milliseconds.
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Interval as a [`Duration`].
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl TryFrom<Duration> for Interval {
    type Error = FusedLocationError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        u32::try_from(duration.as_millis())
            .map(Interval)
            .map_err(|_| FusedLocationError::InvalidArgument {
                arg: "interval",
                reason: format!("{duration:?} does not fit in 32-bit milliseconds"),
            })
    }
}

impl FromStr for Interval {
    type Err = FusedLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_end_matches("ms")
            .parse::<u32>()
            .map(Interval)
            .map_err(|_| FusedLocationError::InvalidArgument {
                arg: "interval",
                reason: format!("'{s}' is not a number of milliseconds"),
            })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Remote object a proxy is bound to.
///
/// A lookup key into the bus, not a resource: holding one does not keep
/// anything alive on the service side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Well-known bus name of the service
    pub service: String,
    /// Object path of the remote object
    pub path: String,
    /// Interface the remote methods belong to
    pub interface: String,
}

impl Default for Destination {
    fn default() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            path: OBJECT_PATH.to_string(),
            interface: INTERFACE_NAME.to_string(),
        }
    }
}
