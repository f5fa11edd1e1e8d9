use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, ConvertError};

fn default_binary_path() -> String {
    "ffmpeg".to_string()
}

fn default_loglevel() -> String {
    "quiet".to_string()
}

fn default_problematic_formats() -> Vec<String> {
    vec!["Microsoft ASF".to_string()]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub media: MediaConfig,
    pub encoding: EncodingConfig,
    pub probe: ProbeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Value passed to `-loglevel`
    pub loglevel: String,
    /// Where intermediate files and concat lists go; system temp dir when unset
    pub temp_dir: Option<PathBuf>,
}

/// Normalized output profile shared by single conversions and merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub video_codec: String,
    /// Constant rate factor (0-51, lower = better quality)
    pub crf: u8,
    pub profile: String,
    pub level: String,
    pub pix_fmt: String,
    pub audio_codec: String,
    pub audio_channels: u32,
    pub audio_bitrate: String,
    /// Move the moov atom to the front of the file
    pub faststart: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Signatures that break the concat demuxer and force pre-conversion
    pub problematic_formats: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for a daily-rolling log file; console only when unset
    pub directory: Option<PathBuf>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            binary_path: default_binary_path(),
            loglevel: default_loglevel(),
            temp_dir: None,
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            crf: 23,
            profile: "baseline".to_string(),
            level: "3.0".to_string(),
            pix_fmt: "yuv420p".to_string(),
            audio_codec: "aac".to_string(),
            audio_channels: 2,
            audio_bitrate: "128k".to_string(),
            faststart: true,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            problematic_formats: default_problematic_formats(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConvertError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConvertError::Config(format!("Failed to parse config file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_normalized_profile() {
        let config = Config::default();
        assert_eq!(config.media.binary_path, "ffmpeg");
        assert_eq!(config.encoding.crf, 23);
        assert_eq!(config.encoding.profile, "baseline");
        assert_eq!(config.encoding.level, "3.0");
        assert_eq!(config.encoding.audio_bitrate, "128k");
        assert!(config.encoding.faststart);
        assert_eq!(config.probe.problematic_formats, vec!["Microsoft ASF"]);
        assert!(config.logging.directory.is_none());
        assert!(config.media.temp_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [media]
            binary_path = "/opt/ffmpeg/bin/ffmpeg"
            temp_dir = "/var/tmp/videoconv"

            [encoding]
            crf = 28
            "#,
        )
        .unwrap();

        assert_eq!(config.media.binary_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.media.loglevel, "quiet");
        assert_eq!(config.media.temp_dir, Some(PathBuf::from("/var/tmp/videoconv")));
        assert_eq!(config.encoding.crf, 28);
        assert_eq!(config.encoding.video_codec, "libx264");
        assert_eq!(config.probe.problematic_formats.len(), 1);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[encoding]\ncrf = \"high\"").unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videoconv.toml");
        std::fs::write(&path, "[probe]\nproblematic_formats = [\"Microsoft ASF\", \"Macromedia Flash Video\"]\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.probe.problematic_formats.len(), 2);

        assert!(Config::from_file(dir.path().join("missing.toml")).is_err());
    }
}
