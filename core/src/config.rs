//! Serde-loadable pipeline settings.
//!
//! Only scalar knobs live here. Which stages run, and in what order, is
//! decided in code on the builder.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codec::CodecKind;
use crate::compression::{DEFAULT_LEVEL_DEFLATE, MAX_LEVEL_DEFLATE};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// `build_custom` needs an explicit codec.
    #[error("no codec configured")]
    MissingCodec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Per-operation limit in milliseconds. Absent means no timeout.
    pub timeout_ms: Option<u64>,
    pub codec: CodecKind,
    /// zlib level used when the pipeline compresses (0-9).
    pub compression_level: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            codec: CodecKind::default(),
            compression_level: DEFAULT_LEVEL_DEFLATE,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compression_level > MAX_LEVEL_DEFLATE {
            return Err(ConfigError::Invalid(format!(
                "compression_level {} exceeds {}",
                self.compression_level, MAX_LEVEL_DEFLATE
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("timeout_ms must be > 0".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
