//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Extensions converted when no override is configured.
pub const DEFAULT_FORMATS: [&str; 6] = ["jpg", "jpeg", "bmp", "png", "gif", "tiff"];

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of parallel workers (0 = one per CPU core)
    pub workers: usize,

    /// Extensions eligible for conversion, matched case-insensitively
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            supported_formats: DEFAULT_FORMATS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Capacity of the channel carrying results from workers to the pool
    pub buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { buffer_size: 64 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Output format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
