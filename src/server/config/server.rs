use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

/// Server identity advertised in startup telemetry and `tools list`.
#[derive(Debug, Clone)]
pub struct ServerSection {
    pub name: String,
    pub version: String,
    pub instructions: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawServerSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub instructions: Option<String>,
}

pub fn parse_server_section(
    raw: Option<RawServerSection>,
    path: &Path,
) -> Result<ServerSection, ConfigError> {
    let server_raw = raw.ok_or(ConfigError::MissingField {
        path: path.to_path_buf(),
        field: "server",
    })?;
    let name = server_raw
        .name
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "server.name",
        })?;
    let version = server_raw
        .version
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "server.version",
        })?;

    Ok(ServerSection {
        name,
        version,
        instructions: server_raw.instructions,
    })
}
