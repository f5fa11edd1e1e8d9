use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::config::EncodingConfig;
use crate::error::{Result, ConvertError};

/// Abstract media processing command representation
///
/// Arguments are kept as `OsString` so paths reach ffmpeg byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<OsString>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Fail instead of overwriting an existing output
    pub fn no_overwrite(self) -> Self {
        self.arg("-n")
    }

    pub fn loglevel<S: AsRef<OsStr>>(self, level: S) -> Self {
        self.arg("-loglevel").arg(level)
    }

    /// Set video codec
    pub fn video_codec<S: AsRef<OsStr>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Set audio codec
    pub fn audio_codec<S: AsRef<OsStr>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Set audio channels
    pub fn audio_channels(self, channels: u32) -> Self {
        self.arg("-ac").arg(channels.to_string())
    }

    /// Apply the normalized H.264/AAC output profile
    pub fn encoding(self, profile: &EncodingConfig) -> Self {
        let cmd = self
            .video_codec(&profile.video_codec)
            .arg("-crf").arg(profile.crf.to_string())
            .arg("-profile:v").arg(&profile.profile)
            .arg("-level").arg(&profile.level)
            .arg("-pix_fmt").arg(&profile.pix_fmt)
            .audio_codec(&profile.audio_codec)
            .audio_channels(profile.audio_channels)
            .arg("-b:a").arg(&profile.audio_bitrate);

        if profile.faststart {
            cmd.arg("-movflags").arg("faststart")
        } else {
            cmd
        }
    }

    /// Shell-like rendering for logs; not valid for re-execution
    pub fn command_line(&self) -> String {
        std::iter::once(self.binary_path.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command, discarding its console output
    pub async fn execute(&self) -> Result<()> {
        debug!("Executing media processing command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let status = Command::new(&self.binary_path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ConvertError::MediaFailed {
                description: self.description.clone(),
                reason: format!("failed to execute {}: {}", self.binary_path, e),
            })?
            .wait()
            .await?;

        if !status.success() {
            return Err(ConvertError::MediaFailed {
                description: self.description.clone(),
                reason: format!("{} exited with {}", self.binary_path, status),
            });
        }

        Ok(())
    }
}

/// Builder for the conversions this tool performs
#[derive(Debug, Clone)]
pub struct MediaCommandBuilder {
    binary_path: String,
    loglevel: String,
}

impl MediaCommandBuilder {
    /// Create a new command builder
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, loglevel: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            loglevel: loglevel.into(),
        }
    }

    /// Build a single-file conversion into the normalized profile.
    ///
    /// `overwrite` is only set for reserved temporary outputs.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        profile: &EncodingConfig,
        overwrite: bool,
    ) -> MediaCommand {
        let cmd = MediaCommand::new(
            &self.binary_path,
            format!("Conversion of {}", input_path.as_ref().display()),
        )
        .loglevel(&self.loglevel);

        let cmd = if overwrite { cmd.overwrite() } else { cmd.no_overwrite() };

        cmd.input(input_path)
            .encoding(profile)
            .output(output_path)
    }

    /// Build a concat-demuxer merge of the files named in `list_path`
    pub fn concat<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        list_path: P,
        output_path: Q,
        profile: &EncodingConfig,
    ) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Merge")
            .loglevel(&self.loglevel)
            .no_overwrite()
            .arg("-f").arg("concat")
            .arg("-safe").arg("0")
            .input(list_path)
            .encoding(profile)
            .output(output_path)
    }

    /// Build version check command
    pub fn version_check(&self) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Version check")
            .arg("-version")
    }
}
