//! Message framing and the wire-level request/response model.

pub mod framed;
pub mod wire;

pub use framed::{stdio, FramedTransport, Inbound};
pub use wire::{ErrorBody, ErrorKind, Request, Response};
