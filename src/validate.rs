use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, ConvertError};

/// Check the output does not exist yet and every input does.
///
/// Only reads the filesystem; the first missing input is reported.
pub fn validate_paths(inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.is_empty() {
        return Err(ConvertError::NoInputs);
    }

    if output.exists() {
        return Err(ConvertError::OutputExists(output.to_path_buf()));
    }

    for input in inputs {
        if !input.exists() {
            return Err(ConvertError::InputMissing(input.clone()));
        }
    }

    debug!("Validated {} input(s) -> {}", inputs.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_accepts_existing_inputs_and_fresh_output() {
        let dir = assert_fs::TempDir::new().unwrap();
        let a = dir.child("a.mp4");
        a.touch().unwrap();

        let result = validate_paths(&[a.to_path_buf()], &dir.path().join("out.mp4"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_existing_output() {
        let dir = assert_fs::TempDir::new().unwrap();
        let a = dir.child("a.mp4");
        a.touch().unwrap();
        let out = dir.child("out.mp4");
        out.touch().unwrap();

        let err = validate_paths(&[a.to_path_buf()], out.path()).unwrap_err();
        assert!(matches!(err, ConvertError::OutputExists(_)));
        assert_eq!(err.to_string(), "Output file already exists!");
    }

    #[test]
    fn test_output_checked_before_inputs() {
        let dir = assert_fs::TempDir::new().unwrap();
        let out = dir.child("out.mp4");
        out.touch().unwrap();

        let err = validate_paths(&[dir.path().join("missing.mp4")], out.path()).unwrap_err();
        assert!(matches!(err, ConvertError::OutputExists(_)));
    }

    #[test]
    fn test_names_first_missing_input() {
        let dir = assert_fs::TempDir::new().unwrap();
        let a = dir.child("a.mp4");
        a.touch().unwrap();
        let b = dir.path().join("b.mp4");
        let c = dir.path().join("c.mp4");

        let err = validate_paths(&[a.to_path_buf(), b.clone(), c], &dir.path().join("out.mp4"))
            .unwrap_err();
        match err {
            ConvertError::InputMissing(path) => assert_eq!(path, b),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_inputs() {
        let err = validate_paths(&[], Path::new("out.mp4")).unwrap_err();
        assert!(matches!(err, ConvertError::NoInputs));
    }
}
