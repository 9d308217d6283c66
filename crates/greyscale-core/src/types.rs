//! Core data types for the greyscale conversion pipeline.
//!
//! These types describe the outcome of converting images: one
//! [`ConversionResult`] per image and a [`ConversionReport`] per run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConversionError;

/// Stage at which an image failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Reading or decoding the source
    Decode,
    /// Encoding or writing the output
    Write,
    /// The owning worker crashed before reaching the image
    Worker,
}

/// Outcome of converting a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionResult {
    /// Greyscale image was written to `output`
    Converted { source: PathBuf, output: PathBuf },

    /// Conversion failed; the failure is local to this image
    Failed {
        source: PathBuf,
        stage: FailureStage,
        message: String,
    },
}

impl ConversionResult {
    /// Build a result from a transformer outcome.
    pub fn from_outcome(source: &Path, outcome: Result<PathBuf, ConversionError>) -> Self {
        match outcome {
            Ok(output) => ConversionResult::Converted {
                source: source.to_path_buf(),
                output,
            },
            Err(e) => ConversionResult::Failed {
                source: source.to_path_buf(),
                stage: e.stage(),
                message: e.to_string(),
            },
        }
    }

    /// Path of the source image.
    pub fn source(&self) -> &Path {
        match self {
            ConversionResult::Converted { source, .. } => source,
            ConversionResult::Failed { source, .. } => source,
        }
    }

    /// Path of the written image, if conversion succeeded.
    pub fn output(&self) -> Option<&Path> {
        match self {
            ConversionResult::Converted { output, .. } => Some(output),
            ConversionResult::Failed { .. } => None,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionResult::Converted { .. })
    }
}

/// Aggregated outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Number of workers the list was split across
    pub workers: usize,

    /// Workers that terminated abnormally
    pub crashed_workers: usize,

    /// One entry per discovered image, in discovery order
    pub results: Vec<ConversionResult>,

    /// Wall-clock time of the run in seconds
    pub total_seconds: f64,
}

impl ConversionReport {
    /// Images written successfully.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_converted()).count()
    }

    /// Images that failed for any reason.
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Conversion rate over the whole run.
    pub fn images_per_second(&self) -> f64 {
        if self.total_seconds > 0.0 {
            self.results.len() as f64 / self.total_seconds
        } else {
            0.0
        }
    }

    /// Failed results only.
    pub fn failures(&self) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(|r| !r.is_converted())
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
