//! The built-in `hello` tool.

use schemars::{schema_for, JsonSchema};
use serde::Deserialize;
use serde_json::json;

use crate::{
    lib::errors::RegistryError,
    server::runtime::{handler_fn, RegisteredTool, ToolRegistry},
};

pub const HELLO_TOOL_ID: &str = "hello";
pub const HELLO_GREETING: &str = "Hello from the server!";

/// Params accepted by `hello`. Every field is optional; the greeting does
/// not depend on them.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct HelloParams {}

pub fn register(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(RegisteredTool::new(
        HELLO_TOOL_ID,
        "A simple hello world tool",
        Some(schema_for!(HelloParams)),
        handler_fn(|_params| async move { Ok(json!(HELLO_GREETING)) }),
    ))
}
