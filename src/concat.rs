use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{Result, ConvertError};

const LIST_FILE_NAME: &str = "videolist";

/// Render the concat demuxer list: one `file '<absolute path>'` line per input.
///
/// Single quotes are closed, escaped and reopened (`'\''`). Line breaks cannot
/// be represented in the list format and are rejected.
pub fn render_concat_list(paths: &[PathBuf]) -> Result<String> {
    let mut list = String::new();

    for path in paths {
        let absolute = std::path::absolute(path)?;
        let text = absolute
            .to_str()
            .ok_or_else(|| ConvertError::UnsupportedPath(absolute.display().to_string()))?;

        if text.contains(['\n', '\r']) {
            return Err(ConvertError::UnsupportedPath(format!(
                "{:?} contains a line break",
                text
            )));
        }

        list.push_str("file '");
        list.push_str(&text.replace('\'', r"'\''"));
        list.push_str("'\n");
    }

    Ok(list)
}

/// Concat list written into its own temporary directory under `temp_root`.
///
/// The directory and list are removed when this value is dropped.
pub struct ConcatList {
    _dir: TempDir,
    path: PathBuf,
}

impl ConcatList {
    pub fn write(paths: &[PathBuf], temp_root: &Path) -> Result<Self> {
        let content = render_concat_list(paths)?;
        let dir = tempfile::tempdir_in(temp_root)?;
        let path = dir.path().join(LIST_FILE_NAME);
        std::fs::write(&path, content)?;

        debug!("Wrote concat list with {} entries to {}", paths.len(), path.display());
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
