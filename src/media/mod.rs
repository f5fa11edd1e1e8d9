// Media processing behind a runner abstraction
//
// - Commands: ffmpeg argument construction
// - Processor: runners that execute (or only log) those commands

pub mod commands;
pub mod processor;

use async_trait::async_trait;

pub use commands::*;
pub use processor::*;

use crate::config::MediaConfig;
use crate::error::Result;

/// Executes media processing commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion; a non-zero exit is an error
    async fn run(&self, command: &MediaCommand) -> Result<()>;

    /// Check the external tool can be launched
    async fn check_availability(&self) -> Result<()>;
}

/// Factory for creating runner instances
pub struct CommandRunnerFactory;

impl CommandRunnerFactory {
    /// Create the runner for this invocation
    pub fn create_runner(config: &MediaConfig, dry_run: bool) -> Box<dyn CommandRunner> {
        if dry_run {
            Box::new(processor::DryRunRunner)
        } else {
            Box::new(processor::FfmpegRunner::new(config.clone()))
        }
    }
}
