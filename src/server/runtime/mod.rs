//! Server startup, tool registry, and request dispatch.
mod dispatcher;
pub mod registry;
mod server_info;
mod startup;

pub use dispatcher::Dispatcher;
pub use registry::{handler_fn, RegisteredTool, ToolDescriptor, ToolHandler, ToolRegistry};
pub use server_info::build_instructions;
pub use startup::{run_server, run_session, RuntimeExit};
