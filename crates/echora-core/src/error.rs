//! Error types for echo synthesis and convolution.

use thiserror::Error;

/// Malformed or out-of-range user parameters.
///
/// Validation errors are always recoverable: nothing is mutated and no
/// file is touched before they are raised.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Delay was zero or negative.
    #[error("delay must be a positive number of milliseconds, got {0}")]
    NonPositiveDelay(i64),

    /// Delay was larger than the longest supported delay.
    #[error("delay must be at most {max} milliseconds, got {0}", max = u32::MAX)]
    DelayOutOfRange(String),

    /// Decay was outside [0.0, 1.0].
    #[error("decay must be between 0.0 and 1.0, got {0}")]
    DecayOutOfRange(f32),

    /// Parameter text could not be parsed.
    #[error("{field} is not a valid number: '{input}'")]
    NotANumber {
        /// Which parameter failed to parse.
        field: &'static str,
        /// The offending text.
        input: String,
    },

    /// Convolution was requested without an impulse response.
    #[error("no impulse response selected")]
    NoImpulseSelected,

    /// Convolution produced an all-zero result that cannot be normalized.
    #[error("convolution result is silent and cannot be normalized")]
    SilentResult,

    /// Impulse response and audio disagree on sample rate.
    #[error("impulse sample rate {found} Hz does not match audio sample rate {expected} Hz")]
    SampleRateMismatch {
        /// Sample rate of the audio being processed.
        expected: u32,
        /// Sample rate of the impulse response.
        found: u32,
    },
}

/// Errors produced by the core transformation engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Parameter validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Buffer shape is not usable (channel count, lengths, sample rate).
    #[error("invalid buffer layout: {0}")]
    Layout(String),

    /// Unexpected failure while synthesizing or convolving.
    #[error("processing failed: {0}")]
    Processing(String),
}

/// Convenience result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_number_display() {
        let err = ValidationError::NotANumber {
            field: "delay",
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "delay is not a valid number: 'abc'");
    }

    #[test]
    fn delay_out_of_range_display() {
        let err = ValidationError::DelayOutOfRange("4294967296".to_string());
        assert_eq!(
            err.to_string(),
            "delay must be at most 4294967295 milliseconds, got 4294967296"
        );
    }

    #[test]
    fn validation_is_transparent() {
        let err: Error = ValidationError::NoImpulseSelected.into();
        assert_eq!(err.to_string(), "no impulse response selected");
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NoImpulseSelected)
        ));
    }

    #[test]
    fn sample_rate_mismatch_display() {
        let err = ValidationError::SampleRateMismatch {
            expected: 48000,
            found: 44100,
        };
        let msg = err.to_string();
        assert!(msg.contains("44100"), "got: {msg}");
        assert!(msg.contains("48000"), "got: {msg}");
    }
}
