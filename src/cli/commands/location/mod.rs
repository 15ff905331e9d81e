//! Commands talking to the FusedLocation provider.
mod accuracy;
mod echo;
mod interval;
mod register;
mod status;
mod utils;
mod watch;

use std::sync::Arc;

pub use accuracy::AccuracyCommand;
pub use echo::EchoCommand;
pub use interval::IntervalCommand;
pub use register::RegisterCommand;
pub use status::StatusCommand;
pub use watch::WatchCommand;

use crate::{cli::CommandRegistry, config::ClientConfig};

/// Registers all location commands with the command registry
///
/// # Arguments
///
/// * `registry` - Mutable reference to the command registry
/// * `config` - Shared client settings for the commands
pub fn register_commands(registry: &mut CommandRegistry, config: Arc<ClientConfig>) {
    const CATEGORY_NAME: &str = "location";

    registry.register_command(CATEGORY_NAME, Box::new(EchoCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(RegisterCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(AccuracyCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(IntervalCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(WatchCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(StatusCommand::new(config)));
}
