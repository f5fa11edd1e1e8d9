use async_trait::async_trait;
use tracing::{info, debug};

use crate::config::MediaConfig;
use crate::error::{Result, ConvertError};
use super::{CommandRunner, MediaCommand, MediaCommandBuilder};

/// Runs commands with the configured ffmpeg binary
pub struct FfmpegRunner {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl FfmpegRunner {
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path, &config.loglevel);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl CommandRunner for FfmpegRunner {
    async fn run(&self, command: &MediaCommand) -> Result<()> {
        info!("{} started", command.description);
        command.execute().await?;
        info!("{} completed", command.description);
        Ok(())
    }

    async fn check_availability(&self) -> Result<()> {
        debug!("Checking media processor at {}", self.config.binary_path);

        self.command_builder
            .version_check()
            .execute()
            .await
            .map_err(|e| ConvertError::ToolUnavailable(format!("{}: {}", self.config.binary_path, e)))?;

        info!("Media processor is available");
        Ok(())
    }
}

/// Logs commands instead of running them
pub struct DryRunRunner;

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, command: &MediaCommand) -> Result<()> {
        info!("[dry run] {}: {}", command.description, command.command_line());
        Ok(())
    }

    async fn check_availability(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_binary() {
        let runner = FfmpegRunner::new(MediaConfig {
            binary_path: "/nonexistent/videoconv-ffmpeg".to_string(),
            ..MediaConfig::default()
        });

        let err = runner.check_availability().await.unwrap_err();
        assert!(matches!(err, ConvertError::ToolUnavailable(_)));
    }

    #[tokio::test]
    async fn test_dry_run_never_spawns() {
        let runner = DryRunRunner;
        let cmd = MediaCommand::new("/nonexistent/videoconv-ffmpeg", "Merge").arg("-version");

        runner.check_availability().await.unwrap();
        runner.run(&cmd).await.unwrap();
    }
}
