//! Greyscale Core - parallel, directory-wide greyscale conversion.
//!
//! Every image directly inside a folder is converted to single-channel luma,
//! with the work split statically across one worker per CPU core.
//!
//! # Architecture
//!
//! ```text
//! Folder → Discover → Split into N chunks → N workers (Decode → Luma → Write) → Join → Report
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use greyscale_core::{Config, Greyscale};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> greyscale_core::Result<()> {
//!     let greyscale = Greyscale::new(Config::load()?);
//!
//!     let report = greyscale
//!         .run_folder(Path::new("/photos"), Some(Path::new("/photos/grey")))
//!         .await?;
//!     println!("{} converted, {} failed", report.succeeded(), report.failed());
//!     println!("{}", report.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{
    ArgumentError, ConfigError, ConversionError, ConversionOutcome, GreyscaleError, Result,
};
pub use pipeline::{Convert, FileDiscovery, ImageTransformer, RunTarget, WorkerPool};
pub use types::{ConversionReport, ConversionResult, FailureStage};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Greyscale runner - discovers, splits, dispatches, and joins.
pub struct Greyscale {
    config: Config,
    discovery: FileDiscovery,
    pool: WorkerPool,
}

impl Greyscale {
    /// Create a runner whose worker count is resolved from the configuration.
    pub fn new(config: Config) -> Self {
        let workers = config.worker_count();
        Self::with_converter(config, Arc::new(ImageTransformer::new()), workers)
    }

    /// Create a runner with an explicit converter and worker count.
    pub fn with_converter(config: Config, converter: Arc<dyn Convert>, workers: usize) -> Self {
        tracing::debug!("Initializing greyscale v{} with {} worker(s)", VERSION, workers);
        Self {
            discovery: FileDiscovery::new(&config.processing),
            pool: WorkerPool::new(converter, workers, config.pipeline.clone()),
            config,
        }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of workers each run is split across.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Discover the images a run over `folder` would convert.
    pub fn discover(&self, folder: &Path) -> Vec<PathBuf> {
        self.discovery.discover(folder)
    }

    /// Convert every image in the target folder.
    pub async fn run(&self, target: &RunTarget) -> ConversionReport {
        let images = self.discover(&target.folder);
        self.convert(images, target.destination.as_deref(), |_| {})
            .await
    }

    /// Check `folder` and `save_to`, then convert every image in the folder.
    ///
    /// Fails before any image is touched when either path is invalid.
    pub async fn run_folder(
        &self,
        folder: &Path,
        save_to: Option<&Path>,
    ) -> Result<ConversionReport> {
        let target = RunTarget::check(folder, save_to)?;
        Ok(self.run(&target).await)
    }

    /// Convert an already-discovered list, reporting each result as it lands.
    pub async fn convert<F>(
        &self,
        images: Vec<PathBuf>,
        destination: Option<&Path>,
        on_result: F,
    ) -> ConversionReport
    where
        F: FnMut(&ConversionResult),
    {
        self.pool
            .run_with_progress(images, destination, on_result)
            .await
    }
}
