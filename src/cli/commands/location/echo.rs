use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::ClientConfig,
};

use super::utils::{connect, service_error};

/// Command to send a diagnostic echo to the service
pub struct EchoCommand {
    config: Arc<ClientConfig>,
}

impl EchoCommand {
    /// Creates a new EchoCommand
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for EchoCommand {
    /// Sends the message and prints the service's answer
    ///
    /// # Errors
    ///
    /// Returns CliError if the message is missing or the call fails
    async fn execute(&self, args: &[String]) -> CommandResult {
        let message = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <message> argument for 'echo' command".to_string())
        })?;

        let client = connect(&self.config).await?;
        client.echo(message).await.map_err(service_error)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "echo".to_string(),
            description: "Send a message and print the service's answer".to_string(),
            args: vec![CommandArg {
                name: "message".to_string(),
                description: "Text to send".to_string(),
                required: true,
                value_type: ArgType::String,
            }],
            examples: vec!["fusedloc location echo hello".to_string()],
        }
    }
}
