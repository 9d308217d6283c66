//! Greyscale CLI - convert every image in a folder to greyscale using all CPU cores.
//!
//! Images directly inside the folder (jpg, jpeg, bmp, png, gif, tiff) are
//! split into one contiguous chunk per core and converted in parallel.
//!
//! # Usage
//!
//! ```bash
//! # Convert in place
//! greyscale /home/me/photos
//!
//! # Write greyscale copies elsewhere (created if missing)
//! greyscale /home/me/photos --save_to /home/me/photos-grey
//!
//! # View configuration
//! greyscale config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Greyscale - convert colour images in a folder to greyscale in parallel.
#[derive(Parser, Debug)]
#[command(name = "greyscale")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Use this config file instead of the default location
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    convert: cli::convert::ConvertArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match &cli.config {
        Some(path) => greyscale_core::Config::load_from(path)?,
        None => match greyscale_core::Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `greyscale config path`."
                );
                greyscale_core::Config::default()
            }
        },
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("greyscale v{}", greyscale_core::VERSION);

    match cli.command {
        Some(Commands::Config(args)) => cli::config::execute(args, config, cli.config).await,
        None => cli::convert::execute(cli.convert, config).await,
    }
}
