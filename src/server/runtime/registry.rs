//! Tool registry: named handlers, unique by name, immutable after startup.

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use anyhow::Result;
use schemars::Schema;
use serde::Serialize;
use serde_json::Value;

use crate::lib::errors::RegistryError;

/// Boxed future returned by a handler invocation.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// A unit of logic registered under a unique name, invoked with the opaque
/// request params. Handler failures are returned, never panicked.
pub trait ToolHandler: Send + Sync {
    fn invoke(&self, params: Value) -> HandlerFuture;
}

struct FnHandler<F>(F);

impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    fn invoke(&self, params: Value) -> HandlerFuture {
        Box::pin((self.0)(params))
    }
}

/// Wrap an async closure as a [`ToolHandler`].
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn ToolHandler>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

/// One registry entry: metadata plus the handler capability.
#[derive(Clone)]
pub struct RegisteredTool {
    name: String,
    description: String,
    params_schema: Option<Schema>,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        params_schema: Option<Schema>,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params_schema,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invoke(&self, params: Value) -> HandlerFuture {
        self.handler.invoke(params)
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            params_schema: self
                .params_schema
                .as_ref()
                .map(|schema| schema.clone().to_value()),
        }
    }
}

/// Serializable tool metadata surfaced by `tools list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_schema: Option<Value>,
}

/// Registry of named tools. Mutated only during startup; the dispatch loop
/// reads it through an `Arc` and never writes.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, rejecting duplicate names.
    pub fn register(&mut self, tool: RegisteredTool) -> Result<(), RegistryError> {
        if self.tools.contains_key(tool.name()) {
            return Err(RegistryError::DuplicateName {
                name: tool.name().to_string(),
            });
        }
        self.tools.insert(tool.name().to_string(), tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Descriptors of all registered tools, sorted by name for stable output.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<_> = self.tools.values().map(RegisteredTool::descriptor).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }
}
