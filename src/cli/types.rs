use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
///
/// Covers everything from command discovery failures to errors reported
/// by the location service.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid number of arguments were provided to a command.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A single argument could not be parsed or is out of range.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        arg: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The service backing a command failed.
    #[error("{service} service error: {details}")]
    ServiceError {
        /// Name of the failing service
        service: String,
        /// Error details
        details: String,
    },
}

/// Type alias for command execution results.
///
/// All CLI commands return either their output as a String or a CliError
/// describing what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "message", "level").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument, shown in help.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A numeric value.
    Number,

    /// One of a fixed set of names.
    Choice(Vec<String>),
}

impl ArgType {
    /// Short value hint for help output.
    pub fn hint(&self) -> String {
        match self {
            ArgType::String => "text".to_string(),
            ArgType::Number => "number".to_string(),
            ArgType::Choice(choices) => choices.join("|"),
        }
    }
}

/// Complete metadata for a CLI command.
///
/// Single source of truth for a command's identity, arguments and usage
/// examples. Used for help generation and argument count validation.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "echo", "watch").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against the
    /// command's metadata; the command validates the values themselves.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values or service failures.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
