//! Request dispatch: match a request to a registered handler and turn the
//! outcome into a response frame.

use std::sync::Arc;

use uuid::Uuid;

use super::registry::{ToolDescriptor, ToolRegistry};
use crate::{
    lib::telemetry::DispatchSpan,
    server::transport::{Request, Response},
};

/// Routes requests to registered handlers. Cheap to clone; the registry is
/// shared read-only.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registered_tools(&self) -> usize {
        self.registry.len()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.registry.descriptors()
    }

    /// Dispatch one request. Every failure below the transport is converted
    /// into an error response here; nothing escapes as a panic or `Err`.
    pub async fn dispatch(&self, request: Request) -> Response {
        let request_id = Uuid::new_v4();
        let span = DispatchSpan::start(request_id, &request.tool_name);

        let Some(tool) = self.registry.get(&request.tool_name) else {
            let response = Response::unknown_tool(&request.tool_name);
            span.finish("unknown_tool");
            return response;
        };

        match tool.invoke(request.params).await {
            Ok(content) => {
                span.finish("ok");
                Response::content(content)
            }
            Err(err) => {
                tracing::warn!(
                    target: "toolbus::dispatch",
                    request_id = %request_id,
                    tool_name = %request.tool_name,
                    error = %err,
                    "Handler returned an error"
                );
                span.finish("handler_failed");
                Response::handler_failed(format!("{err:#}"))
            }
        }
    }
}
