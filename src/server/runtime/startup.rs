use std::process::ExitCode;

use anyhow::Error;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    cli::LaunchProfile,
    lib::errors::TransportError,
    server::{
        config::ServerConfig,
        runtime::{build_instructions, Dispatcher},
        transport::{self, FramedTransport, Inbound, Response},
    },
    tools,
};

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }
}

/// Start the dispatch server on stdio. Returns `Ok(())` on clean shutdown
/// (input stream closed); transport failures map to a non-zero exit.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let registry = tools::builtin_registry().map_err(|err| RuntimeExit::from_error(Error::new(err)))?;
    let dispatcher = Dispatcher::new(registry);
    let instructions = build_instructions(&config);

    crate::lib::telemetry::emit_runtime_mode(&crate::lib::telemetry::RuntimeModeTelemetry {
        transport: "stdio",
        server_name: &config.server.name,
        server_version: &config.server.version,
        config_path: config.source_path.to_string_lossy().as_ref(),
        registered_tools: dispatcher.registered_tools(),
        instructions: &instructions,
        launch_args: &profile.launch_args,
    });

    let mut transport = transport::stdio(config.limits.max_frame_bytes);
    run_session(&dispatcher, &mut transport)
        .await
        .map_err(RuntimeExit::from_error)?;

    tracing::info!(
        target: "toolbus::runtime",
        "Input stream closed; shutting down cleanly"
    );
    Ok(())
}

/// Serve one connection: read frames, dispatch in arrival order, write each
/// response before reading the next frame. Ends when the input closes.
pub async fn run_session<R, W>(
    dispatcher: &Dispatcher,
    transport: &mut FramedTransport<R, W>,
) -> Result<(), TransportError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    while let Some(inbound) = transport.recv().await? {
        let response = match inbound {
            Inbound::Request(request) => dispatcher.dispatch(request).await,
            Inbound::Malformed { message } => {
                tracing::warn!(
                    target: "toolbus::transport",
                    reason = %message,
                    "Rejected malformed frame"
                );
                Response::malformed_request(message)
            }
        };
        transport.send(&response).await?;
    }
    Ok(())
}
