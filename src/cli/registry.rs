use std::{collections::HashMap, sync::Arc};

use crate::config::ClientConfig;

use super::{CliError, Command, commands::location, types::CommandMetadata};

/// Registry for CLI commands organized by category.
///
/// ```text
/// registry
/// └── location
///     ├── accuracy
///     ├── echo
///     ├── interval
///     ├── register
///     ├── status
///     └── watch
/// ```
pub struct CommandRegistry {
    /// Nested HashMap structure: category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
    client_config: Arc<ClientConfig>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    ///
    /// Commands must be added with `register_command` or
    /// `register_all_commands`.
    pub fn new(client_config: Arc<ClientConfig>) -> Self {
        Self {
            categories: HashMap::new(),
            client_config,
        }
    }

    /// Registers a command in the specified category.
    ///
    /// The command's metadata name is used as its key; an existing command
    /// with the same name in the category is replaced.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or the command
    /// doesn't exist, `CliError::InvalidArguments` if the argument count
    /// doesn't match the command's metadata. Other errors come from the
    /// command itself.
    pub async fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let found_command = found_category.get(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find command '{command_name}'"))
        })?;

        Self::validate_args(&found_command.metadata(), args)?;

        found_command.execute(args).await
    }

    /// Lists all registered commands organized by category.
    ///
    /// Categories and commands are sorted alphabetically.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        let mut categories: Vec<(String, Vec<String>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut command_list: Vec<String> = commands.keys().cloned().collect();
                command_list.sort();

                (category.clone(), command_list)
            })
            .collect();

        categories.sort();

        categories
    }

    /// Metadata of every command in `category`, sorted by name.
    pub fn category_metadata(&self, category: &str) -> Vec<CommandMetadata> {
        let mut metadata: Vec<CommandMetadata> = self
            .categories
            .get(category)
            .map(|commands| commands.values().map(|c| c.metadata()).collect())
            .unwrap_or_default();

        metadata.sort_by(|a, b| a.name.cmp(&b.name));
        metadata
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at least {} arguments, got {}",
                required_count,
                args.len(),
            )));
        }

        if args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at most {} arguments, got {}",
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers all available CLI commands in their respective categories.
    pub fn register_all_commands(&mut self) {
        let config = Arc::clone(&self.client_config);
        location::register_commands(self, config);
    }
}
