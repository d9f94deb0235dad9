//! Telemetry initialization and dispatch span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs. Logs go to stderr so that
/// stdout stays reserved for protocol frames.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of a single dispatch.
pub struct DispatchSpan {
    span: Span,
    started_at: Instant,
    request_id: Uuid,
}

impl DispatchSpan {
    /// Start a dispatch span for the named tool.
    pub fn start(request_id: Uuid, tool_name: &str) -> Self {
        let span = info_span!(
            target: "toolbus::dispatch",
            "dispatch",
            %request_id,
            tool_name
        );
        Self {
            span,
            started_at: Instant::now(),
            request_id,
        }
    }

    /// Close the span while recording the dispatch outcome.
    pub fn finish(self, outcome: &'static str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "toolbus::dispatch",
            request_id = %self.request_id,
            outcome = outcome,
            elapsed_ms = elapsed_ms,
            "Completed dispatch"
        );
    }
}

/// Payload for logging runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub server_name: &'a str,
    pub server_version: &'a str,
    pub config_path: &'a str,
    pub registered_tools: usize,
    pub instructions: &'a str,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "toolbus::runtime",
        transport = telemetry.transport,
        server_name = telemetry.server_name,
        server_version = telemetry.server_version,
        config_path = telemetry.config_path,
        registered_tools = telemetry.registered_tools,
        instructions = telemetry.instructions,
        launch_args = ?telemetry.launch_args,
        "Started dispatch server"
    );
}
