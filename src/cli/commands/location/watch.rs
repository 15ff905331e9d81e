use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::pin;
use tracing::{info, warn};

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_position,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::ClientConfig,
    services::{Interval, Position},
};

use super::utils::{argument_error, connect, service_error};

/// How each received position is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Command to subscribe to position updates and print them
///
/// Registers the client, subscribes with the given minimal interval and
/// prints updates until the requested count is reached, the service closes
/// the stream, or Ctrl+C is pressed.
pub struct WatchCommand {
    config: Arc<ClientConfig>,
}

impl WatchCommand {
    /// Creates a new WatchCommand
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }

    fn parse_count(arg: Option<&String>) -> Result<Option<usize>, CliError> {
        arg.map(|count| {
            count
                .parse::<usize>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| CliError::InvalidArgument {
                    arg: "count".to_string(),
                    reason: format!("'{count}' is not a positive number"),
                })
        })
        .transpose()
    }

    fn parse_format(arg: Option<&String>) -> Result<OutputFormat, CliError> {
        match arg.map(|s| s.as_str()) {
            None | Some("text") => Ok(OutputFormat::Text),
            Some("json") => Ok(OutputFormat::Json),
            Some(other) => Err(CliError::InvalidArgument {
                arg: "format".to_string(),
                reason: format!("unknown format '{other}', expected text or json"),
            }),
        }
    }

    fn render(position: &Position, format: OutputFormat) -> Result<String, CliError> {
        match format {
            OutputFormat::Text => Ok(format_position(position)),
            OutputFormat::Json => serde_json::to_string(position).map_err(|e| {
                CliError::ServiceError {
                    service: "FusedLocation".to_string(),
                    details: format!("Failed to serialize position: {e}"),
                }
            }),
        }
    }
}

#[async_trait]
impl Command for WatchCommand {
    /// Streams position updates to stdout
    ///
    /// # Errors
    ///
    /// Returns CliError if an argument is invalid, the service rejects the
    /// subscription, or the update stream breaks
    async fn execute(&self, args: &[String]) -> CommandResult {
        let interval_str = args.first().ok_or_else(|| {
            CliError::InvalidArguments(
                "Expected <milliseconds> argument for 'watch' command".to_string(),
            )
        })?;
        let interval = interval_str
            .parse::<Interval>()
            .map_err(|e| argument_error("milliseconds", e))?;
        let limit = Self::parse_count(args.get(1))?;
        let format = Self::parse_format(args.get(2))?;

        let client = connect(&self.config).await?;
        client.register_client().await.map_err(service_error)?;
        let updates = client.subscribe(interval).await.map_err(service_error)?;
        info!(%interval, "Subscribed to position updates");

        let stream = updates.into_stream().map_err(service_error)?;
        pin!(stream);

        let mut received = 0usize;
        loop {
            let update = tokio::select! {
                update = stream.next() => update,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping");
                    break;
                }
            };

            let Some(update) = update else {
                warn!("Service closed the position stream");
                break;
            };

            let position = update.map_err(service_error)?;
            println!("{}", Self::render(&position, format)?);
            received += 1;

            if limit.is_some_and(|limit| received >= limit) {
                break;
            }
        }

        Ok(format!("Received {received} position update(s)"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "watch".to_string(),
            description: "Subscribe to position updates and print them".to_string(),
            args: vec![
                CommandArg {
                    name: "milliseconds".to_string(),
                    description: "Minimal interval between updates in milliseconds".to_string(),
                    required: true,
                    value_type: ArgType::Number,
                },
                CommandArg {
                    name: "count".to_string(),
                    description: "Stop after this many updates. Runs until interrupted if not specified.".to_string(),
                    required: false,
                    value_type: ArgType::Number,
                },
                CommandArg {
                    name: "format".to_string(),
                    description: "Output format".to_string(),
                    required: false,
                    value_type: ArgType::Choice(vec!["text".to_string(), "json".to_string()]),
                },
            ],
            examples: vec![
                "fusedloc location watch 2000".to_string(),
                "fusedloc location watch 1000 10".to_string(),
                "fusedloc location watch 1000 5 json".to_string(),
            ],
        }
    }
}
