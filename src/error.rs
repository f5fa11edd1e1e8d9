use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("At least one input file is required")]
    NoInputs,

    #[error("Output file already exists!")]
    OutputExists(PathBuf),

    #[error("Input file {} does not exist!", .0.display())]
    InputMissing(PathBuf),

    #[error("Unsupported path for concat list: {0}")]
    UnsupportedPath(String),

    #[error("Media processor unavailable: {0}")]
    ToolUnavailable(String),

    #[error("{description} failed: {reason}")]
    MediaFailed { description: String, reason: String },

    #[error("Cannot probe {}: {reason}", .path.display())]
    Probe { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
