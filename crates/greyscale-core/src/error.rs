//! Error types for the greyscale conversion pipeline.
//!
//! Errors are split by blast radius: argument and configuration errors abort a
//! run before any work starts, conversion errors are attributed to exactly one
//! image and never stop the rest of its chunk.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::FailureStage;

/// Top-level error type for greyscale operations.
#[derive(Error, Debug)]
pub enum GreyscaleError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid source folder or destination
    #[error("Invalid arguments: {0}")]
    Argument(#[from] ArgumentError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Problems with the folders handed to a run. Always fatal.
#[derive(Error, Debug)]
pub enum ArgumentError {
    /// Source folder is relative, missing, or not a directory
    #[error("Invalid path to folder with images - {}", .0.display())]
    InvalidFolder(PathBuf),

    /// Destination folder was given as a relative path
    #[error("Invalid path to folder for greyscale images - {}", .0.display())]
    RelativeDestination(PathBuf),

    /// Destination folder is absent and could not be created
    #[error("Cannot create folder for greyscale images {}: {source}", .path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-image conversion errors.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Image could not be read or decoded
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Output extension names a format the codec cannot encode
    #[error("Unsupported output format for {path}: {extension}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Encoding or writing the output failed
    #[error("Write error for {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// The worker owning this image terminated before reaching it
    #[error("Worker {worker} crashed before converting {path}: {message}")]
    WorkerCrash {
        path: PathBuf,
        worker: usize,
        message: String,
    },
}

impl ConversionError {
    /// Pipeline stage the failure belongs to.
    pub fn stage(&self) -> FailureStage {
        match self {
            ConversionError::Decode { .. } => FailureStage::Decode,
            ConversionError::UnsupportedFormat { .. } | ConversionError::Write { .. } => {
                FailureStage::Write
            }
            ConversionError::WorkerCrash { .. } => FailureStage::Worker,
        }
    }
}

/// Convenience type alias for greyscale results.
pub type Result<T> = std::result::Result<T, GreyscaleError>;

/// Convenience type alias for single-image conversion results.
pub type ConversionOutcome<T> = std::result::Result<T, ConversionError>;
