//! videoconv - convert one or more files into a single video
//!
//! Command-line entry point: parses arguments, loads configuration, sets up
//! logging and hands the paths to the conversion workflow.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use videoconv::cli::Args;
use videoconv::config::{Config, LoggingConfig};
use videoconv::workflow::Workflow;

const DEFAULT_CONFIG_FILE: &str = "videoconv.toml";

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)
            .with_context(|| format!("Loading {}", config_path.display()))?,
        None => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                Config::from_file(DEFAULT_CONFIG_FILE)?
            } else {
                Config::default()
            }
        }
    };

    if let Some(ffmpeg) = &args.ffmpeg {
        config.media.binary_path = ffmpeg.clone();
    }

    setup_logging(args.verbose, &config.logging)?;
    debug!("Configuration: {:?}", config);

    let workflow = Workflow::from_config(config, args.dry_run);
    let plan = workflow.run(args.inputs(), args.output()).await?;

    info!("Done ({:?})", plan);
    Ok(())
}

fn setup_logging(verbose: bool, logging: &LoggingConfig) -> Result<()> {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // Optional file layer with daily rotation
    let file_layer = match &logging.directory {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("Creating log directory {}", log_dir.display()))?;
            let (non_blocking_file, guard) = non_blocking(rolling::daily(log_dir, "videoconv.log"));
            // Keep the guard alive for the duration of the program
            std::mem::forget(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking_file)
                    .with_target(false)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    debug!("Logging initialized at {}", log_level);
    Ok(())
}
