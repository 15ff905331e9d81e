//! Unit tests for CLI module
//!
//! Tests command registry, formatting, and argument validation.
//! No bus access: nothing here reaches a command that connects.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, CliService, Command, CommandRegistry, CommandResult,
        formatting::format_position,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::ClientConfig,
    services::Position,
};

struct JoinCommand;

#[async_trait]
impl Command for JoinCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        Ok(args.join("+"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "join".to_string(),
            description: "Join arguments".to_string(),
            args: vec![
                CommandArg {
                    name: "first".to_string(),
                    description: "First value".to_string(),
                    required: true,
                    value_type: ArgType::String,
                },
                CommandArg {
                    name: "second".to_string(),
                    description: "Second value".to_string(),
                    required: false,
                    value_type: ArgType::String,
                },
            ],
            examples: vec![],
        }
    }
}

fn test_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new(Arc::new(ClientConfig::default()));
    registry.register_command("test", Box::new(JoinCommand));
    registry
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn command_registry_starts_empty() {
    let registry = CommandRegistry::new(Arc::new(ClientConfig::default()));
    assert!(registry.list_commands().is_empty());
}

#[tokio::test]
async fn command_registry_executes_registered_command() {
    let registry = test_registry();

    let output = registry
        .execute("test", "join", &args(&["a", "b"]))
        .await
        .unwrap();
    assert_eq!(output, "a+b");

    let output = registry.execute("test", "join", &args(&["a"])).await.unwrap();
    assert_eq!(output, "a");
}

#[tokio::test]
async fn command_registry_rejects_unknown_names() {
    let registry = test_registry();

    let err = registry.execute("nope", "join", &[]).await.unwrap_err();
    assert!(matches!(err, CliError::CommandNotFound(ref msg) if msg.contains("category 'nope'")));

    let err = registry.execute("test", "split", &[]).await.unwrap_err();
    assert!(matches!(err, CliError::CommandNotFound(ref msg) if msg.contains("command 'split'")));
}

#[tokio::test]
async fn command_registry_validates_argument_count() {
    let registry = test_registry();

    let err = registry.execute("test", "join", &[]).await.unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments(ref msg) if msg.contains("at least 1")));

    let err = registry
        .execute("test", "join", &args(&["a", "b", "c"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments(ref msg) if msg.contains("at most 2")));
}

#[test]
fn cli_service_registers_location_commands() {
    let service = CliService::new(ClientConfig::default());

    let commands = service.list_all();
    assert_eq!(
        commands,
        vec![(
            "location".to_string(),
            args(&["accuracy", "echo", "interval", "register", "status", "watch"])
        )]
    );
}

#[tokio::test]
async fn location_commands_reject_bad_values_before_connecting() {
    let service = CliService::new(ClientConfig::default());

    let err = service
        .execute_command("location", "accuracy", &args(&["ultra"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument { ref arg, .. } if arg == "level"));

    let err = service
        .execute_command("location", "interval", &args(&["soon"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument { ref arg, .. } if arg == "milliseconds"));

    let err = service
        .execute_command("location", "watch", &args(&["1000", "0"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument { ref arg, .. } if arg == "count"));
}

#[test]
fn help_lists_every_command() {
    let service = CliService::new(ClientConfig::default());
    let help = service.help();

    for name in ["accuracy", "echo", "interval", "register", "status", "watch"] {
        assert!(help.contains(name), "help is missing {name}");
    }
    assert!(help.contains("<milliseconds>"));
    assert!(help.contains("[count]"));
}

#[test]
fn help_shows_argument_value_types() {
    let help = CliService::new(ClientConfig::default()).help();

    assert!(help.contains("(no-power|balanced|high)"));
    assert!(help.contains("(text|json)"));
    assert!(help.contains("(number)"));
    assert!(help.contains("(text)"));
}

#[test]
fn arg_type_hint() {
    assert_eq!(ArgType::String.hint(), "text");
    assert_eq!(ArgType::Number.hint(), "number");
    assert_eq!(
        ArgType::Choice(args(&["on", "off"])).hint(),
        "on|off"
    );
}

#[test]
fn format_position_renders_utc_time() {
    let position = Position {
        timestamp: 1_462_000_000,
        latitude: 52.2297,
        longitude: 21.0122,
        altitude: 100.04,
    };

    assert_eq!(
        format_position(&position),
        "2016-04-30 07:06:40 UTC lat 52.229700 lon 21.012200 alt 100.0m"
    );
}

#[test]
fn format_position_keeps_zero_timestamp_raw() {
    let position = Position {
        timestamp: 0,
        latitude: -33.8688,
        longitude: 151.2093,
        altitude: 0.0,
    };

    assert!(format_position(&position).starts_with("@0 lat -33.868800"));
}
