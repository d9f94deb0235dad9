//! In-process session tests driving the dispatch loop over duplex pipes.

use anyhow::anyhow;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::task::JoinHandle;

use toolbus::{
    lib::errors::TransportError,
    server::{
        runtime::{handler_fn, run_session, Dispatcher, RegisteredTool, ToolRegistry},
        transport::FramedTransport,
    },
};

const FRAME_LIMIT: usize = 65536;

fn test_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry
        .register(RegisteredTool::new(
            "hello",
            "A simple hello world tool",
            None,
            handler_fn(|_params| async move { Ok(json!("Hello from the server!")) }),
        ))
        .expect("register hello");
    registry
        .register(RegisteredTool::new(
            "echo",
            "returns its params unchanged",
            None,
            handler_fn(|params| async move { Ok(params) }),
        ))
        .expect("register echo");
    registry
        .register(RegisteredTool::new(
            "always_fails",
            "handler that always errors",
            None,
            handler_fn(|_params| async move { Err(anyhow!("intentional failure")) }),
        ))
        .expect("register always_fails");
    registry
}

struct SessionHarness {
    writes: DuplexStream,
    reads: BufReader<DuplexStream>,
    session: JoinHandle<Result<(), TransportError>>,
}

fn start_session() -> SessionHarness {
    let dispatcher = Dispatcher::new(test_registry());
    let (client_writes, server_reads) = tokio::io::duplex(1 << 20);
    let (server_writes, client_reads) = tokio::io::duplex(1 << 20);
    let session = tokio::spawn(async move {
        let mut transport = FramedTransport::new(server_reads, server_writes, FRAME_LIMIT);
        run_session(&dispatcher, &mut transport).await
    });
    SessionHarness {
        writes: client_writes,
        reads: BufReader::new(client_reads),
        session,
    }
}

impl SessionHarness {
    async fn send(&mut self, line: &str) {
        self.writes
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("session write");
    }

    async fn read_response(&mut self) -> Value {
        let mut line = String::new();
        let read = self
            .reads
            .read_line(&mut line)
            .await
            .expect("session read");
        assert!(read > 0, "session closed stdout before responding");
        serde_json::from_str(line.trim_end()).expect("response frame is JSON")
    }

    async fn finish(self) {
        drop(self.writes);
        self.session
            .await
            .expect("session task must not panic")
            .expect("session must end cleanly at stream close");
    }
}

#[tokio::test]
async fn unknown_tool_gets_error_response_and_connection_survives() {
    let mut harness = start_session();

    harness
        .send(r#"{"toolName": "no_such_tool", "params": {}}"#)
        .await;
    let response = harness.read_response().await;
    assert_eq!(
        response.pointer("/error/kind").and_then(Value::as_str),
        Some("unknown_tool"),
        "got: {response}"
    );

    harness.send(r#"{"toolName": "hello", "params": {}}"#).await;
    let response = harness.read_response().await;
    assert_eq!(response, json!({"content": "Hello from the server!"}));

    harness.finish().await;
}

#[tokio::test]
async fn handler_failure_gets_error_response_and_connection_survives() {
    let mut harness = start_session();

    harness
        .send(r#"{"toolName": "always_fails", "params": {}}"#)
        .await;
    let response = harness.read_response().await;
    assert_eq!(
        response.pointer("/error/kind").and_then(Value::as_str),
        Some("handler_failed"),
        "got: {response}"
    );
    assert!(
        response
            .pointer("/error/message")
            .and_then(Value::as_str)
            .expect("error message present")
            .contains("intentional failure"),
        "got: {response}"
    );

    harness.send(r#"{"toolName": "hello", "params": {}}"#).await;
    let response = harness.read_response().await;
    assert_eq!(response, json!({"content": "Hello from the server!"}));

    harness.finish().await;
}

#[tokio::test]
async fn malformed_frame_gets_error_response_and_connection_survives() {
    let mut harness = start_session();

    harness.send(r#"{"params": {}}"#).await;
    let response = harness.read_response().await;
    assert_eq!(
        response.pointer("/error/kind").and_then(Value::as_str),
        Some("malformed_request"),
        "got: {response}"
    );

    harness.send(r#"{"toolName": "hello", "params": {}}"#).await;
    let response = harness.read_response().await;
    assert_eq!(response, json!({"content": "Hello from the server!"}));

    harness.finish().await;
}

#[tokio::test]
async fn over_length_frame_gets_error_response_and_connection_survives() {
    let mut harness = start_session();

    let long_params = "x".repeat(FRAME_LIMIT * 2);
    harness
        .send(&format!(
            r#"{{"toolName": "echo", "params": "{long_params}"}}"#
        ))
        .await;
    let response = harness.read_response().await;
    assert_eq!(
        response.pointer("/error/kind").and_then(Value::as_str),
        Some("malformed_request"),
        "got: {response}"
    );
    assert!(
        response
            .pointer("/error/message")
            .and_then(Value::as_str)
            .expect("error message present")
            .contains("exceeds"),
        "got: {response}"
    );

    harness.send(r#"{"toolName": "hello", "params": {}}"#).await;
    let response = harness.read_response().await;
    assert_eq!(response, json!({"content": "Hello from the server!"}));

    harness.finish().await;
}

#[tokio::test]
async fn one_hundred_requests_are_answered_in_arrival_order() {
    let mut harness = start_session();

    for seq in 0..100 {
        harness
            .send(&format!(
                r#"{{"toolName": "echo", "params": {{"seq": {seq}}}}}"#
            ))
            .await;
    }

    for seq in 0..100 {
        let response = harness.read_response().await;
        assert_eq!(
            response.pointer("/content/seq").and_then(Value::as_i64),
            Some(seq),
            "response out of order at position {seq}: {response}"
        );
    }

    harness.finish().await;
}
