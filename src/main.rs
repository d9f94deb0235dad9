//! Entry point for Toolbus.
use std::process::ExitCode;

use clap::Parser;
use toolbus::{
    cli::{execute_cli_command, LaunchProfileArgs, ParsedCommand},
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{self, RuntimeExit},
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;

    match LaunchProfileArgs::parse()
        .into_command()
        .map_err(RuntimeExit::from_error)?
    {
        ParsedCommand::RunServer(profile) => {
            let config = ServerConfig::load_from_path(profile.config_path.clone())
                .map_err(RuntimeExit::from_error)?;
            runtime::run_server(profile, config).await
        }
        ParsedCommand::Cli(command) => {
            let payload = execute_cli_command(command).map_err(RuntimeExit::from_error)?;
            println!("{payload}");
            Ok(())
        }
    }
}
