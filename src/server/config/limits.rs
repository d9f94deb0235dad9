use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_MAX_FRAME_BYTES: usize = 64 * 1024;
const MIN_FRAME_BYTES: usize = 1024;
const MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Transport limits.
#[derive(Debug, Clone)]
pub struct LimitsSection {
    pub max_frame_bytes: usize,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLimitsSection {
    pub max_frame_bytes: Option<usize>,
}

pub fn parse_limits_section(
    raw: Option<RawLimitsSection>,
    path: &Path,
) -> Result<LimitsSection, ConfigError> {
    let limits_raw = raw.unwrap_or_default();
    let max_frame_bytes = limits_raw.max_frame_bytes.unwrap_or(DEFAULT_MAX_FRAME_BYTES);
    validate_max_frame_bytes(max_frame_bytes, path)?;
    Ok(LimitsSection { max_frame_bytes })
}

fn validate_max_frame_bytes(value: usize, path: &Path) -> Result<(), ConfigError> {
    if (MIN_FRAME_BYTES..=MAX_FRAME_BYTES).contains(&value) {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "limits.max_frame_bytes",
        message: format!("Use a frame limit in the range {MIN_FRAME_BYTES}-{MAX_FRAME_BYTES}"),
    })
}
