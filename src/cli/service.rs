use std::sync::Arc;

use crate::config::ClientConfig;

use super::{
    CliError, CommandRegistry,
    formatting::{format_category, format_command, format_description, format_header, format_usage},
};

/// High-level service for managing and executing CLI commands.
///
/// Provides a unified interface for command registration, discovery, and execution.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    ///
    /// # Arguments
    /// * `client_config` - How commands reach the location service
    pub fn new(client_config: ClientConfig) -> Self {
        let mut registry = CommandRegistry::new(Arc::new(client_config));
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist in the category.
    /// Returns any error the command reports during execution.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        self.registry.execute(category, command_name, args).await
    }

    /// Lists all available commands organized by category.
    ///
    /// # Returns
    /// Vector of (category_name, command_names) tuples
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Renders help text for every registered command.
    pub fn help(&self) -> String {
        let mut output = format!(
            "{}\n\n  fusedloc [--config <path>] [--system] <category> <command> [args...]\n",
            format_header("Usage")
        );

        for (category, _) in self.list_all() {
            output.push_str(&format!("\n{}\n", format_category(&category)));

            for metadata in self.registry.category_metadata(&category) {
                let args: Vec<String> = metadata
                    .args
                    .iter()
                    .map(|arg| {
                        if arg.required {
                            format!("<{}>", arg.name)
                        } else {
                            format!("[{}]", arg.name)
                        }
                    })
                    .collect();

                output.push_str(&format!(
                    "  {} {}\n      {}\n",
                    format_command(&metadata.name),
                    args.join(" "),
                    format_description(&metadata.description)
                ));

                for arg in &metadata.args {
                    output.push_str(&format!(
                        "      {:<14}{} ({})\n",
                        arg.name,
                        arg.description,
                        arg.value_type.hint()
                    ));
                }

                for example in &metadata.examples {
                    output.push_str(&format!("      {}\n", format_usage(example)));
                }
            }
        }

        output
    }
}
