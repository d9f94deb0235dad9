//! Wire model for framed requests and responses.
//!
//! One JSON document per line. Requests name a tool and carry opaque params;
//! responses carry either a content value or a structured error body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single tool invocation request. Consumed immediately after decode,
/// never retained across dispatches.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub tool_name: String,
    #[serde(default)]
    pub params: Value,
}

/// Machine-readable failure category carried in error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownTool,
    HandlerFailed,
    MalformedRequest,
}

/// Error body of a failed dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// A single response frame, transient per handled request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Content { content: Value },
    Error { error: ErrorBody },
}

impl Response {
    pub fn content(value: Value) -> Self {
        Self::Content { content: value }
    }

    pub fn unknown_tool(tool_name: &str) -> Self {
        Self::Error {
            error: ErrorBody {
                kind: ErrorKind::UnknownTool,
                message: format!("No tool registered under `{tool_name}`"),
            },
        }
    }

    pub fn handler_failed(message: String) -> Self {
        Self::Error {
            error: ErrorBody {
                kind: ErrorKind::HandlerFailed,
                message,
            },
        }
    }

    pub fn malformed_request(message: String) -> Self {
        Self::Error {
            error: ErrorBody {
                kind: ErrorKind::MalformedRequest,
                message,
            },
        }
    }

    /// Error kind, if this response is an error.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Content { .. } => None,
            Self::Error { error } => Some(error.kind),
        }
    }
}
