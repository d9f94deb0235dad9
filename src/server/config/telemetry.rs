use tracing::{debug, info};

use super::{ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_env_source(path: &std::path::Path, from_env: bool) {
    if from_env {
        info!(
            target: "toolbus::config",
            path = %path.display(),
            "Loading configuration using TOOLBUS_CONFIG_PATH environment variable"
        );
    } else {
        debug!(
            target: "toolbus::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "TOOLBUS_CONFIG_PATH not set; using default config.toml"
        );
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "toolbus::config",
        path = %config.source_path.display(),
        server_name = %config.server.name,
        server_version = %config.server.version,
        max_frame_bytes = config.limits.max_frame_bytes,
        "Configuration file loaded successfully"
    );
}
