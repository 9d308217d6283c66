//! The default command: convert a folder of images to greyscale.

use clap::Args;
use console::style;
use greyscale_core::{Config, ConversionReport, Greyscale, RunTarget};
use std::path::PathBuf;

/// Arguments for a conversion run.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Absolute path to the folder with images to transform
    #[arg(required = true, value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    /// Absolute path to the folder where greyscale images should be saved
    #[arg(short, long = "save_to", alias = "save-to", value_name = "DIR")]
    pub save_to: Option<PathBuf>,

    /// Number of parallel workers (defaults to one per CPU core)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Print the full conversion report as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute a conversion run.
pub async fn execute(args: ConvertArgs, mut config: Config) -> anyhow::Result<()> {
    let Some(folder) = args.folder.as_deref() else {
        anyhow::bail!("Invalid arguments. Try again!\n\n  Hint: pass the folder with images.");
    };

    // CLI-only checks first: RunTarget::check may create the destination.
    if let Some(workers) = args.workers {
        if workers == 0 {
            anyhow::bail!("--workers must be > 0\n\n  Invalid arguments. Try again!");
        }
        config.processing.workers = workers;
    }

    let target = RunTarget::check(folder, args.save_to.as_deref())
        .map_err(|e| anyhow::anyhow!("{e}\n\n  Invalid arguments. Try again!"))?;

    let greyscale = Greyscale::new(config);
    let images = greyscale.discover(&target.folder);
    if images.is_empty() {
        tracing::warn!("No supported image files found in {:?}", target.folder);
    } else {
        tracing::info!(
            "Found {} image(s), splitting across {} worker(s)",
            images.len(),
            greyscale.workers()
        );
    }

    let progress = create_progress_bar(images.len() as u64, args.no_progress || images.is_empty());
    let report = greyscale
        .convert(images, target.destination.as_deref(), |result| {
            progress.inc(1);
            if let Some(name) = result.source().file_name() {
                progress.set_message(name.to_string_lossy().into_owned());
            }
        })
        .await;
    progress.finish_and_clear();

    if report.crashed_workers > 0 {
        tracing::warn!(
            "{} worker(s) terminated abnormally; their remaining images were not converted",
            report.crashed_workers
        );
    }
    tracing::info!(
        "Converted {} of {} image(s) in {:.1}s",
        report.succeeded(),
        report.results.len(),
        report.total_seconds
    );

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else if !report.results.is_empty() {
        print_summary(&report);
    }

    Ok(())
}

fn create_progress_bar(total: u64, hidden: bool) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary after the run.
fn print_summary(report: &ConversionReport) {
    let failed = report.failed();

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Converted:    {:>8}", style(report.succeeded()).green());
    if failed > 0 {
        eprintln!("    Failed:       {:>8}", style(failed).red());
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", report.results.len());
    eprintln!("    Workers:      {:>8}", report.workers);
    eprintln!("    Duration:     {:>7.1}s", report.total_seconds);
    eprintln!("    Rate:         {:>7.1} img/sec", report.images_per_second());
    eprintln!("  ====================================");

    for failure in report.failures() {
        eprintln!("    {} {}", style("✗").red(), failure.source().display());
    }
}
