use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::ClientConfig,
    services::AccuracyLevel,
};

use super::utils::{argument_error, connect, service_error};

/// Command to set the desired accuracy level
pub struct AccuracyCommand {
    config: Arc<ClientConfig>,
}

impl AccuracyCommand {
    /// Creates a new AccuracyCommand
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for AccuracyCommand {
    /// Parses the level and forwards it to the service
    ///
    /// # Errors
    ///
    /// Returns CliError if the level is unknown or the call fails
    async fn execute(&self, args: &[String]) -> CommandResult {
        let level_str = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <level> argument for 'accuracy' command".to_string())
        })?;

        let level = level_str
            .parse::<AccuracyLevel>()
            .map_err(|e| argument_error("level", e))?;

        let client = connect(&self.config).await?;
        client.set_accuracy(level).await.map_err(service_error)?;

        Ok(format!("Accuracy set to {level}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "accuracy".to_string(),
            description: "Set the desired accuracy level".to_string(),
            args: vec![CommandArg {
                name: "level".to_string(),
                description: "no-power, balanced or high (or 0, 1, 2)".to_string(),
                required: true,
                value_type: ArgType::Choice(
                    AccuracyLevel::ALL.iter().map(|l| l.to_string()).collect(),
                ),
            }],
            examples: vec![
                "fusedloc location accuracy high".to_string(),
                "fusedloc location accuracy 0".to_string(),
            ],
        }
    }
}
