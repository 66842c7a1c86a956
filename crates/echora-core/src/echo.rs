//! Tail-extending echo synthesis.
//!
//! Unlike a streaming feedback delay, [`EchoSynthesizer`] works on a whole
//! buffer and lengthens it: the output holds the original signal followed
//! by room for the delayed copy to ring out.
//!
//! ```text
//! out.len() = in.len() + delay_samples
//! out[i]                  = in[i]                      (i < in.len())
//! out[i + delay_samples] += decay * in[i]
//! ```
//!
//! Every output sample is clamped to [-1.0, 1.0] after mixing.

use crate::{AudioBuffer, EchoParameters, Error, Result};

/// Single-tap echo over a complete buffer.
///
/// # Example
///
/// ```rust
/// use echora_core::{AudioBuffer, EchoParameters, EchoSynthesizer};
///
/// let input = AudioBuffer::mono(vec![0.5; 5], 1000).unwrap();
/// let echo = EchoSynthesizer::new(EchoParameters::new(2, 0.5).unwrap());
/// let output = echo.apply(&input).unwrap();
///
/// assert_eq!(output.channel(0), &[0.5, 0.5, 0.75, 0.75, 0.75, 0.25, 0.25]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EchoSynthesizer {
    params: EchoParameters,
}

impl EchoSynthesizer {
    /// Create an echo with validated parameters.
    pub fn new(params: EchoParameters) -> Self {
        Self { params }
    }

    /// The parameters this echo was built with.
    pub fn params(&self) -> EchoParameters {
        self.params
    }

    /// Apply the echo, returning a buffer `delay_samples` frames longer.
    ///
    /// Channel count and sample rate are preserved. A zero-sample delay
    /// folds the echo onto the original, scaling it by `1 + decay`.
    /// Fails with [`Error::Processing`] when the extended output cannot be
    /// allocated.
    pub fn apply(&self, buffer: &AudioBuffer) -> Result<AudioBuffer> {
        let delay = self.params.delay_samples(buffer.sample_rate());
        let decay = self.params.decay();
        let len = buffer.len();
        let out_len = len.checked_add(delay).ok_or_else(|| {
            Error::Processing(format!(
                "echo output length overflows ({len} + {delay} frames)"
            ))
        })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            frames = len,
            delay_samples = delay,
            decay,
            channels = buffer.channel_count(),
            "echo: synthesizing"
        );

        let mut output = buffer.silent_like(out_len)?;
        for (index, source) in buffer.channels().enumerate() {
            let target = output.channel_mut(index);
            target[..len].copy_from_slice(source);
            for (i, &sample) in source.iter().enumerate() {
                target[i + delay] += decay * sample;
            }
        }
        output.clamp_in_place();
        Ok(output)
    }
}
