use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        Command, CommandResult, formatting::format_warning, types::CommandMetadata,
    },
    config::ClientConfig,
    services::{FusedLocationClient, FusedLocationError, fused_location::SERVICE_NAME},
};

use super::utils::service_error;

/// Command to check whether the provider is running
pub struct StatusCommand {
    config: Arc<ClientConfig>,
}

impl StatusCommand {
    /// Creates a new StatusCommand
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for StatusCommand {
    /// Reports whether the service name has an owner on the bus
    ///
    /// # Errors
    ///
    /// Returns CliError if the bus itself is unreachable
    async fn execute(&self, _args: &[String]) -> CommandResult {
        match FusedLocationClient::connect(&self.config).await {
            Ok(_) => Ok(format!("{SERVICE_NAME} is running on the {} bus", self.config.bus)),
            Err(FusedLocationError::ServiceNotFound { service }) => Ok(format_warning(&format!(
                "{service} is not running on the {} bus",
                self.config.bus
            ))),
            Err(e) => Err(service_error(e)),
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "status".to_string(),
            description: "Check whether the location provider is running".to_string(),
            args: vec![],
            examples: vec!["fusedloc --system location status".to_string()],
        }
    }
}
