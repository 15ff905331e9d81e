use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::ClientConfig,
};

use super::utils::{connect, service_error};

/// Command to register this process as a location client
pub struct RegisterCommand {
    config: Arc<ClientConfig>,
}

impl RegisterCommand {
    /// Creates a new RegisterCommand
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for RegisterCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let client = connect(&self.config).await?;
        client.register_client().await.map_err(service_error)?;

        Ok("Client registered".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "register".to_string(),
            description: "Register as a location client".to_string(),
            args: vec![],
            examples: vec!["fusedloc location register".to_string()],
        }
    }
}
