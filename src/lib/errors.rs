use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Startup-time registration failures. Fatal: a registry with a duplicate
/// name must never reach the dispatch loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool `{name}` is already registered")]
    DuplicateName { name: String },
}

/// Connection-fatal transport failures. Dispatch-level failures (unknown
/// tool, handler errors, malformed frames) are never surfaced here; they
/// travel back to the client as error responses instead.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to read frame from transport: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
    #[error("Failed to write frame to transport: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode response: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}
