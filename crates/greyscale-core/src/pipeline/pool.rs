//! Fork/join worker pool over statically partitioned chunks.
//!
//! The discovered list is split once into one contiguous chunk per worker.
//! Each worker runs on its own blocking thread and converts its chunk in
//! order; there is no queue and no rebalancing, so a worker that finishes
//! early simply exits. Results flow back over a bounded channel and the pool
//! waits for every worker before returning.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::error::ConversionError;
use crate::types::{ConversionReport, ConversionResult};

use super::channel::bounded_channel;
use super::chunk::chunk_ranges;
use super::transform::Convert;

/// Pool that converts a list of images with a fixed number of workers.
pub struct WorkerPool {
    converter: Arc<dyn Convert>,
    workers: usize,
    pipeline: PipelineConfig,
}

impl WorkerPool {
    /// Create a pool of `workers` workers (at least one).
    pub fn new(converter: Arc<dyn Convert>, workers: usize, pipeline: PipelineConfig) -> Self {
        Self {
            converter,
            workers: workers.max(1),
            pipeline,
        }
    }

    /// Number of workers, and therefore chunks, per run.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Convert `images`, blocking until every worker has terminated.
    pub async fn run(&self, images: Vec<PathBuf>, destination: Option<&Path>) -> ConversionReport {
        self.run_with_progress(images, destination, |_| {}).await
    }

    /// Convert `images`, calling `on_result` as each image completes.
    ///
    /// The report holds exactly one result per input path, in input order.
    /// Images left behind by a crashed worker are reported as worker
    /// failures.
    pub async fn run_with_progress<F>(
        &self,
        images: Vec<PathBuf>,
        destination: Option<&Path>,
        mut on_result: F,
    ) -> ConversionReport
    where
        F: FnMut(&ConversionResult),
    {
        let start = Instant::now();
        let ranges = chunk_ranges(images.len(), self.workers);
        let destination = destination.map(Path::to_path_buf);
        let (tx, mut rx) = bounded_channel::<(usize, ConversionResult)>(&self.pipeline);

        tracing::debug!(
            "Dispatching {} image(s) across {} worker(s)",
            images.len(),
            ranges.len()
        );

        let mut handles = Vec::with_capacity(ranges.len());
        for (worker, range) in ranges.iter().enumerate() {
            let chunk = images[range.clone()].to_vec();
            let converter = self.converter.clone();
            let destination = destination.clone();
            let tx = tx.clone();

            handles.push(tokio::task::spawn_blocking(move || {
                if chunk.is_empty() {
                    return;
                }
                tracing::debug!("Worker {} started with {} image(s)", worker, chunk.len());

                for path in &chunk {
                    let outcome = converter.convert(path, destination.as_deref());
                    if let Err(e) = &outcome {
                        tracing::error!("Failed: {:?} - {}", path, e);
                    }
                    let result = ConversionResult::from_outcome(path, outcome);
                    if tx.blocking_send((worker, result)).is_err() {
                        tracing::warn!("Worker {} lost its result channel, stopping", worker);
                        break;
                    }
                }

                tracing::debug!("Worker {} finished", worker);
            }));
        }
        // Only workers hold senders now, so the channel closes once they all exit.
        drop(tx);

        let mut buckets: Vec<Vec<ConversionResult>> = vec![Vec::new(); ranges.len()];
        while let Some((worker, result)) = rx.recv().await {
            on_result(&result);
            buckets[worker].push(result);
        }

        // Join barrier: every worker has terminated past this loop.
        let mut crashed_workers = 0;
        for (worker, handle) in handles.into_iter().enumerate() {
            let Err(e) = handle.await else {
                continue;
            };
            crashed_workers += 1;

            let range = &ranges[worker];
            let done = buckets[worker].len();
            let abandoned = &images[range.start + done..range.end];
            tracing::error!(
                "Worker {} crashed: {} ({} image(s) left unconverted)",
                worker,
                e,
                abandoned.len()
            );

            for path in abandoned {
                let result = ConversionResult::from_outcome(
                    path,
                    Err(ConversionError::WorkerCrash {
                        path: path.clone(),
                        worker,
                        message: e.to_string(),
                    }),
                );
                on_result(&result);
                buckets[worker].push(result);
            }
        }

        ConversionReport {
            workers: ranges.len(),
            crashed_workers,
            results: buckets.into_iter().flatten().collect(),
            total_seconds: start.elapsed().as_secs_f64(),
        }
    }
}
