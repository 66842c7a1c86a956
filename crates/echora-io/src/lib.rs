//! Audio file I/O layer for echora.
//!
//! This crate provides the codec side of the pipeline:
//!
//! - **WAV file I/O**: [`read_audio`] and [`write_audio`] for loading/saving
//!   mono and stereo files as [`AudioBuffer`](echora_core::AudioBuffer)s
//! - **Codec trait**: [`AudioCodec`] so batch processing can be driven by
//!   any format implementation, with [`WavCodec`] as the default
//! - **Impulse libraries**: [`list_impulses`] and [`load_impulse`] for
//!   folders of impulse-response files
//! - **Scoped renders**: [`TempRender`] for short-lived preview files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use echora_core::{AudioTransformer, EffectMode, validate};
//! use echora_io::{read_audio, write_audio};
//!
//! let (buffer, spec) = read_audio("input.wav")?;
//! let mode = EffectMode::Echo(validate("300", "0.4")?);
//! let output = AudioTransformer::default().transform(&buffer, &mode)?;
//! write_audio("output.wav", &output, spec.bits_per_sample)?;
//! ```

mod codec;
mod impulses;
mod temp;
mod wav;

pub use codec::{AudioCodec, WavCodec};
pub use impulses::{is_audio_file, list_impulses, load_impulse, select_impulse};
pub use temp::TempRender;
pub use wav::{
    SUPPORTED_BIT_DEPTHS, WavFormat, WavInfo, WavSpec, read_audio, read_wav_info, write_audio,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file has a channel count the engine cannot process.
    #[error("Unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Decoded audio could not be turned into a buffer.
    #[error(transparent)]
    Core(#[from] echora_core::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
