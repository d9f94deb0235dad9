//! Server-side modules: configuration, runtime, and transport.

pub mod config;
pub mod runtime;
pub mod transport;
