//! Formatting utilities for CLI output.
//!
//! Provides styled help text and human-readable renderings of position
//! updates.

use chrono::DateTime;

use crate::services::Position;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats warnings with styling
pub fn format_warning(text: &str) -> String {
    format!(
        "{}{}{}{}",
        Colors::BOLD,
        Colors::YELLOW,
        text,
        Colors::RESET
    )
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats category names with styling
pub fn format_category(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::BLUE, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats usage examples with styling
pub fn format_usage(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats a position update as a single line.
///
/// The timestamp is rendered in UTC; a zero or out-of-range timestamp is
/// shown as its raw value.
///
/// # Examples
///
/// ```
/// use fusedloc::{cli::formatting::format_position, services::Position};
///
/// let position = Position {
///     timestamp: 0,
///     latitude: 52.2297,
///     longitude: 21.0122,
///     altitude: 100.0,
/// };
/// assert_eq!(
///     format_position(&position),
///     "@0 lat 52.229700 lon 21.012200 alt 100.0m"
/// );
/// ```
pub fn format_position(position: &Position) -> String {
    let time = match position.timestamp {
        0 => "@0".to_string(),
        seconds => DateTime::from_timestamp(i64::from(seconds), 0)
            .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| format!("@{seconds}")),
    };

    format!(
        "{} lat {:.6} lon {:.6} alt {:.1}m",
        time, position.latitude, position.longitude, position.altitude
    )
}
