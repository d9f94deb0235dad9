//! Built-in tools registered on the server at startup.

pub mod hello;

use crate::{lib::errors::RegistryError, server::runtime::ToolRegistry};

/// Build the registry of built-in tools. The registry is sealed after this:
/// the dispatch loop only ever reads it.
pub fn builtin_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    hello::register(&mut registry)?;
    Ok(registry)
}
