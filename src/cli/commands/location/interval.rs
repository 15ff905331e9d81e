use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::ClientConfig,
    services::Interval,
};

use super::utils::{argument_error, connect, service_error};

/// Command to set the desired update interval
pub struct IntervalCommand {
    config: Arc<ClientConfig>,
}

impl IntervalCommand {
    /// Creates a new IntervalCommand
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for IntervalCommand {
    /// Parses the interval and forwards it to the service
    ///
    /// # Errors
    ///
    /// Returns CliError if the interval is not a number or the call fails
    async fn execute(&self, args: &[String]) -> CommandResult {
        let interval_str = args.first().ok_or_else(|| {
            CliError::InvalidArguments(
                "Expected <milliseconds> argument for 'interval' command".to_string(),
            )
        })?;

        let interval = interval_str
            .parse::<Interval>()
            .map_err(|e| argument_error("milliseconds", e))?;

        let client = connect(&self.config).await?;
        client
            .set_desired_interval(interval)
            .await
            .map_err(service_error)?;

        Ok(format!("Desired interval set to {interval}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "interval".to_string(),
            description: "Set the desired update interval".to_string(),
            args: vec![CommandArg {
                name: "milliseconds".to_string(),
                description: "Interval between updates in milliseconds".to_string(),
                required: true,
                value_type: ArgType::Number,
            }],
            examples: vec!["fusedloc location interval 2000".to_string()],
        }
    }
}
