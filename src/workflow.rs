use futures::future::join_all;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{info, warn};

use crate::concat::ConcatList;
use crate::config::Config;
use crate::error::Result;
use crate::media::{CommandRunner, CommandRunnerFactory, MediaCommandBuilder};
use crate::probe::{FormatClassifier, FormatProbe, SignatureProbe};
use crate::validate::validate_paths;

/// How a set of inputs is turned into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// One input, converted straight to the output
    Single,
    /// Several inputs the concat demuxer can read as they are
    MergeDirect,
    /// At least one problematic input: normalize everything first, then merge
    ConvertThenMerge,
}

pub struct Workflow {
    config: Config,
    runner: Box<dyn CommandRunner>,
    classifier: FormatClassifier,
    commands: MediaCommandBuilder,
}

impl Workflow {
    pub fn new(config: Config, runner: Box<dyn CommandRunner>, probe: Box<dyn FormatProbe>) -> Self {
        let classifier = FormatClassifier::new(probe, &config.probe);
        let commands = MediaCommandBuilder::new(&config.media.binary_path, &config.media.loglevel);

        Self {
            config,
            runner,
            classifier,
            commands,
        }
    }

    /// Workflow backed by ffmpeg (or a dry-run logger) and content sniffing
    pub fn from_config(config: Config, dry_run: bool) -> Self {
        let runner = CommandRunnerFactory::create_runner(&config.media, dry_run);
        Self::new(config, runner, Box::new(SignatureProbe))
    }

    /// Convert `inputs` into a single video at `output`
    pub async fn run(&self, inputs: &[PathBuf], output: &Path) -> Result<Plan> {
        validate_paths(inputs, output)?;
        self.runner.check_availability().await?;

        let plan = self.plan(inputs).await?;
        info!("Converting {} input(s) into {} ({:?})", inputs.len(), output.display(), plan);

        match plan {
            Plan::Single => self.convert(&inputs[0], output).await?,
            Plan::MergeDirect => self.merge(inputs, output).await?,
            Plan::ConvertThenMerge => self.convert_then_merge(inputs, output).await?,
        }

        info!("Finished writing {}", output.display());
        Ok(plan)
    }

    /// Choose a plan; probing stops at the first problematic input
    pub async fn plan(&self, inputs: &[PathBuf]) -> Result<Plan> {
        if inputs.len() == 1 {
            return Ok(Plan::Single);
        }

        for input in inputs {
            if self.classifier.is_problematic(input).await? {
                info!("{} needs normalizing before it can be concatenated", input.display());
                return Ok(Plan::ConvertThenMerge);
            }
        }

        Ok(Plan::MergeDirect)
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let command = self.commands.convert(input, output, &self.config.encoding, false);
        self.runner.run(&command).await
    }

    async fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let list = ConcatList::write(inputs, &self.temp_root())?;
        let command = self.commands.concat(list.path(), output, &self.config.encoding);
        self.runner.run(&command).await
    }

    async fn convert_then_merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        // Dropping a TempPath removes the file, so every early return cleans up
        let temp_root = self.temp_root();
        let temps = inputs
            .iter()
            .map(|_| reserve_temp_path(&temp_root))
            .collect::<Result<Vec<_>>>()?;

        let conversions = inputs.iter().zip(&temps).map(|(input, temp)| {
            let command = self.commands.convert(input, temp, &self.config.encoding, true);
            async move { self.runner.run(&command).await }
        });

        join_all(conversions)
            .await
            .into_iter()
            .collect::<Result<Vec<()>>>()?;

        let temp_paths: Vec<PathBuf> = temps.iter().map(|t| t.to_path_buf()).collect();
        self.merge(&temp_paths, output).await?;

        for temp in temps {
            let path = temp.to_path_buf();
            if let Err(e) = temp.close() {
                warn!("Failed to remove temporary file {}: {}", path.display(), e);
            }
        }

        Ok(())
    }

    /// Directory for intermediate files and concat lists
    fn temp_root(&self) -> PathBuf {
        self.config
            .media
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

/// Reserve `tmp<random>.mp4` inside `dir`
fn reserve_temp_path(dir: &Path) -> Result<TempPath> {
    let file = tempfile::Builder::new()
        .prefix("tmp")
        .suffix(".mp4")
        .rand_bytes(10)
        .tempfile_in(dir)?;

    Ok(file.into_temp_path())
}
