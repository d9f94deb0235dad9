use std::{path::PathBuf, process::Stdio};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    process::{Child, ChildStdin, ChildStdout, Command},
    task::JoinHandle,
};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_toolbus");

pub async fn spawn_server_process() -> Result<(Child, ServerStdio, Option<JoinHandle<()>>)> {
    let mut command = Command::new(BINARY_PATH);
    command
        .env(
            "TOOLBUS_CONFIG_PATH",
            fixture("tests/fixtures/config_valid.toml"),
        )
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn().context("failed to spawn server process")?;
    let stdout = child.stdout.take().expect("child stdout");
    let stdin = child.stdin.take().expect("child stdin");
    let stdio = ServerStdio::new(stdin, stdout);
    let stderr_handle = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
        })
    });
    Ok((child, stdio, stderr_handle))
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

/// Line-oriented stdio bridge to a spawned server process.
pub struct ServerStdio {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ServerStdio {
    pub fn new(stdin: ChildStdin, stdout: ChildStdout) -> Self {
        Self {
            stdin,
            stdout: BufReader::new(stdout),
        }
    }

    /// Write one request frame.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        self.stdin
            .write_all(format!("{line}\n").as_bytes())
            .await
            .context("failed to write request frame")?;
        self.stdin
            .flush()
            .await
            .context("failed to flush request frame")
    }

    /// Read one response frame and decode it as JSON.
    pub async fn read_response(&mut self) -> Result<Value> {
        let mut line = String::new();
        let read = self
            .stdout
            .read_line(&mut line)
            .await
            .context("failed to read response frame")?;
        anyhow::ensure!(read > 0, "server closed stdout before responding");
        serde_json::from_str(line.trim_end()).context("response frame is not valid JSON")
    }

    /// Close the server's stdin, ending its receive loop.
    pub async fn close(mut self) -> Result<()> {
        self.stdin
            .shutdown()
            .await
            .context("failed to close server stdin")
    }
}
