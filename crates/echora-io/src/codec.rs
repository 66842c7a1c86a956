//! Codec abstraction used by batch processing.

use crate::wav::{SUPPORTED_BIT_DEPTHS, read_audio, write_audio};
use crate::{Error, Result};
use echora_core::AudioBuffer;
use std::path::Path;

/// Reads and writes whole audio files.
///
/// Implementations must be shareable across worker threads. Reading must
/// report the file's sample rate and channel count through the returned
/// [`AudioBuffer`]; writing uses the buffer's own sample rate.
pub trait AudioCodec: Send + Sync {
    /// Decode the file at `path`.
    fn read(&self, path: &Path) -> Result<AudioBuffer>;

    /// Encode `buffer` to `path`, replacing any existing file.
    fn write(&self, path: &Path, buffer: &AudioBuffer) -> Result<()>;
}

/// WAV codec backed by `hound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavCodec {
    bits_per_sample: u16,
}

impl Default for WavCodec {
    fn default() -> Self {
        Self {
            bits_per_sample: 32,
        }
    }
}

impl WavCodec {
    /// Codec writing the given bit depth (16, 24 or 32).
    pub fn new(bits_per_sample: u16) -> Result<Self> {
        if !SUPPORTED_BIT_DEPTHS.contains(&bits_per_sample) {
            return Err(Error::UnsupportedFormat(format!(
                "{bits_per_sample}-bit output (expected 16, 24 or 32)"
            )));
        }
        Ok(Self { bits_per_sample })
    }

    /// Output bit depth.
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }
}

impl AudioCodec for WavCodec {
    fn read(&self, path: &Path) -> Result<AudioBuffer> {
        read_audio(path).map(|(buffer, _)| buffer)
    }

    fn write(&self, path: &Path, buffer: &AudioBuffer) -> Result<()> {
        write_audio(path, buffer, self.bits_per_sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsupported_depth() {
        assert!(WavCodec::new(12).is_err());
        assert_eq!(WavCodec::new(24).unwrap().bits_per_sample(), 24);
        assert_eq!(WavCodec::default().bits_per_sample(), 32);
    }

    #[test]
    fn roundtrip_through_trait_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.wav");
        let codec: Box<dyn AudioCodec> = Box::new(WavCodec::default());

        let buffer = AudioBuffer::stereo(vec![0.25, -0.5], vec![0.5, 0.0], 22050).unwrap();
        codec.write(&path, &buffer).unwrap();
        let loaded = codec.read(&path).unwrap();
        assert_eq!(loaded, buffer);
    }

    #[test]
    fn missing_file_is_an_error() {
        let codec = WavCodec::default();
        assert!(codec.read(Path::new("/nonexistent/echora/input.wav")).is_err());
    }
}
