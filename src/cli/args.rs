//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{build_launch_args, resolve_config_path, LaunchProfile};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(CliCommand),
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Inspect the registered tools without starting the server.
    #[command(about = "Inspect the registered tools without starting the server")]
    Tools(ToolsArgs),
}

/// `tools` command container.
#[derive(Debug, Clone, Args)]
#[command(
    about = "Inspect the registered tools",
    long_about = "Inspect the registered tools.\n\nSubcommands:\n  list  Print the registered tool descriptors as JSON."
)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: ToolsCommand,
}

/// Tool inspection subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ToolsCommand {
    /// Print the registered tool descriptors as JSON.
    List,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Toolbus dispatch server (newline-delimited JSON over stdio)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Path to config.toml (overrides TOOLBUS_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;
        let launch_args = build_launch_args(&config_path);

        Ok(LaunchProfile {
            config_path,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        match self.command {
            Some(command) => Ok(ParsedCommand::Cli(command)),
            None => Ok(ParsedCommand::RunServer(self.build()?)),
        }
    }
}
