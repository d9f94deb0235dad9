use crate::server::config::ServerConfig;

/// Build the instructions string logged at startup and echoed by `tools list`.
pub fn build_instructions(config: &ServerConfig) -> String {
    match &config.server.instructions {
        Some(text) => text.clone(),
        None => format!(
            "{name} v{version}: send one JSON request per line on stdin ({{\"toolName\": ..., \"params\": ...}}); responses arrive one per line on stdout.",
            name = config.server.name,
            version = config.server.version
        ),
    }
}
