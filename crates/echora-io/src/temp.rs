//! Short-lived rendered audio files.

use crate::Result;
use crate::wav::write_audio;
use echora_core::AudioBuffer;
use std::path::Path;
use tempfile::NamedTempFile;

/// A buffer rendered to a uniquely named temporary WAV file.
///
/// The file exists for as long as the `TempRender` lives and is removed on
/// drop. Callers hand [`TempRender::path`] to whatever consumes the audio
/// (an external player, for instance) and drop the render once that
/// consumer has finished.
#[derive(Debug)]
pub struct TempRender {
    file: NamedTempFile,
}

impl TempRender {
    /// Render `buffer` into a new temporary file.
    pub fn new(buffer: &AudioBuffer, bits_per_sample: u16) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("echora-preview-")
            .suffix(".wav")
            .tempfile()?;
        write_audio(file.path(), buffer, bits_per_sample)?;
        tracing::debug!(path = %file.path().display(), "rendered temporary audio");
        Ok(Self { file })
    }

    /// Location of the rendered file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, reporting any failure.
    pub fn release(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        tracing::debug!(path = %path.display(), "released temporary audio");
        Ok(())
    }
}
