//! CLI entrypoint module structure.
use anyhow::Result;
use serde_json::json;

use crate::tools;

pub mod args;
pub mod profile;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand, ToolsArgs, ToolsCommand};
pub use profile::{build_launch_args, resolve_config_path, LaunchProfile};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand) -> Result<String> {
    match command {
        CliCommand::Tools(tools_args) => match tools_args.command {
            ToolsCommand::List => list_tools(),
        },
    }
}

/// Build the built-in registry and format its descriptors as JSON.
fn list_tools() -> Result<String> {
    let registry = tools::builtin_registry()?;
    let payload = json!({
        "tools": registry.descriptors(),
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}
