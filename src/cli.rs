use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert one or more files into a single video.",
    long_about = None
)]
pub struct Args {
    /// One or more input files followed by the output file
    #[arg(value_name = "INPUT... OUTPUT", required = true, num_args = 2..)]
    pub paths: Vec<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the ffmpeg binary (overrides the configuration)
    #[arg(long)]
    pub ffmpeg: Option<String>,

    /// Log the ffmpeg commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Input files, in the order given
    pub fn inputs(&self) -> &[PathBuf] {
        &self.paths[..self.paths.len().saturating_sub(1)]
    }

    /// The output file (last positional argument)
    pub fn output(&self) -> &Path {
        self.paths.last().map(PathBuf::as_path).unwrap_or(Path::new(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_path_is_output() {
        let args = Args::try_parse_from(["videoconv", "a.mp4", "b.wmv", "out.mp4"]).unwrap();
        assert_eq!(args.inputs(), &[PathBuf::from("a.mp4"), PathBuf::from("b.wmv")]);
        assert_eq!(args.output(), Path::new("out.mp4"));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_requires_input_and_output() {
        assert!(Args::try_parse_from(["videoconv"]).is_err());
        assert!(Args::try_parse_from(["videoconv", "out.mp4"]).is_err());
    }

    #[test]
    fn test_options() {
        let args = Args::try_parse_from([
            "videoconv", "-v", "--dry-run", "--ffmpeg", "/opt/ffmpeg", "a.mp4", "out.mp4",
        ])
        .unwrap();
        assert!(args.verbose);
        assert!(args.dry_run);
        assert_eq!(args.ffmpeg.as_deref(), Some("/opt/ffmpeg"));
        assert_eq!(args.inputs().len(), 1);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
