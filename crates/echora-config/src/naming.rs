//! Output file naming for batch runs.

use crate::error::ConfigError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Derives output paths from input paths.
///
/// Outputs are named `<stem>_<suffix>.wav` and placed in `dir`, or next to
/// the input when no directory is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    dir: Option<PathBuf>,
    suffix: String,
}

impl OutputNaming {
    /// Create a naming scheme.
    pub fn new(dir: Option<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir,
            suffix: suffix.into(),
        }
    }

    /// Output directory, if one is configured.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Output path for one input.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let name = if self.suffix.is_empty() {
            format!("{stem}.wav")
        } else {
            format!("{stem}_{}.wav", self.suffix)
        };
        match &self.dir {
            Some(dir) => dir.join(name),
            None => input
                .parent()
                .map(|p| p.join(&name))
                .unwrap_or_else(|| PathBuf::from(name)),
        }
    }

    /// Output paths for every input, in order.
    ///
    /// Fails with [`ConfigError::DuplicateOutput`] when two inputs would
    /// write the same file, or when an output would overwrite an input.
    pub fn plan(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ConfigError> {
        let input_set: HashSet<&Path> = inputs.iter().map(PathBuf::as_path).collect();
        let mut seen = HashSet::new();
        let mut outputs = Vec::with_capacity(inputs.len());
        for input in inputs {
            let output = self.output_path_for(input);
            if input_set.contains(output.as_path()) || !seen.insert(output.clone()) {
                return Err(ConfigError::DuplicateOutput(output));
            }
            outputs.push(output);
        }
        Ok(outputs)
    }

    /// Create the output directory if one is configured and missing.
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.dir
            && !dir.exists()
        {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::create_dir(dir, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_next_to_input_by_default() {
        let naming = OutputNaming::new(None, "echo");
        assert_eq!(
            naming.output_path_for(Path::new("/music/take1.wav")),
            PathBuf::from("/music/take1_echo.wav")
        );
    }

    #[test]
    fn output_in_configured_dir() {
        let naming = OutputNaming::new(Some(PathBuf::from("/out")), "hall");
        assert_eq!(
            naming.output_path_for(Path::new("/music/take1.flac.wav")),
            PathBuf::from("/out/take1.flac_hall.wav")
        );
    }

    #[test]
    fn plan_detects_collisions() {
        let naming = OutputNaming::new(Some(PathBuf::from("/out")), "fx");
        let inputs = vec![PathBuf::from("/a/take.wav"), PathBuf::from("/b/take.wav")];
        assert!(matches!(
            naming.plan(&inputs),
            Err(ConfigError::DuplicateOutput(p)) if p == Path::new("/out/take_fx.wav")
        ));
    }

    #[test]
    fn plan_refuses_to_overwrite_inputs() {
        let naming = OutputNaming::new(Some(PathBuf::from("/a")), "");
        let inputs = vec![PathBuf::from("/a/take.wav")];
        assert!(naming.plan(&inputs).is_err());
    }

    #[test]
    fn plan_preserves_order() {
        let naming = OutputNaming::new(None, "fx");
        let inputs = vec![PathBuf::from("/a/one.wav"), PathBuf::from("/a/two.wav")];
        let outputs = naming.plan(&inputs).unwrap();
        assert_eq!(
            outputs,
            vec![PathBuf::from("/a/one_fx.wav"), PathBuf::from("/a/two_fx.wav")]
        );
    }

    #[test]
    fn ensure_dir_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/out");
        OutputNaming::new(Some(dir.clone()), "fx").ensure_dir().unwrap();
        assert!(dir.is_dir());
    }
}
