//! Impulse-response convolution with peak normalization.
//!
//! Each channel of the input is convolved (full linear convolution,
//! `n + m - 1` output frames) with a mono impulse response. The combined
//! result is divided by its peak absolute sample so the loudest sample
//! lands exactly on ±1.0, then clamped.
//!
//! Short products are computed directly in the time domain; above
//! [`DEFAULT_FFT_THRESHOLD`] multiply-adds the engine switches to FFT
//! convolution, zero-padded to the next power of two.

use crate::buffer::zeroed;
use crate::{AudioBuffer, Error, Result, ValidationError};
use rustfft::{Fft, FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// Number of time-domain multiply-adds above which FFT convolution is used.
pub const DEFAULT_FFT_THRESHOLD: usize = 1 << 22;

/// A mono convolution kernel with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl ImpulseResponse {
    /// Create an impulse response from mono samples.
    ///
    /// Fails with [`Error::Layout`] if `samples` is empty or the sample
    /// rate is zero.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::Layout("impulse response is empty".to_string()));
        }
        if sample_rate == 0 {
            return Err(Error::Layout("sample rate must be positive".to_string()));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Build an impulse response from a buffer, averaging channels to mono.
    pub fn from_buffer(buffer: &AudioBuffer) -> Result<Self> {
        Self::new(buffer.to_mono(), buffer.sample_rate())
    }

    /// Kernel samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Kernel length in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: construction rejects empty kernels.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// What to do when the convolution result is entirely silent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SilencePolicy {
    /// Return the silent result unchanged.
    #[default]
    Passthrough,
    /// Fail with [`ValidationError::SilentResult`].
    Reject,
}

/// Convolution engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConvolutionEngine {
    silence: SilencePolicy,
    fft_threshold: usize,
}

impl Default for ConvolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvolutionEngine {
    /// Engine with passthrough silence handling and the default FFT threshold.
    pub fn new() -> Self {
        Self {
            silence: SilencePolicy::Passthrough,
            fft_threshold: DEFAULT_FFT_THRESHOLD,
        }
    }

    /// Set how an all-zero result is handled.
    pub fn with_silence_policy(mut self, policy: SilencePolicy) -> Self {
        self.silence = policy;
        self
    }

    /// Set the multiply-add count above which FFT convolution is used.
    ///
    /// `0` forces FFT convolution; `usize::MAX` forces direct convolution.
    pub fn with_fft_threshold(mut self, threshold: usize) -> Self {
        self.fft_threshold = threshold;
        self
    }

    /// Current silence policy.
    pub fn silence_policy(&self) -> SilencePolicy {
        self.silence
    }

    /// Convolve `buffer` with `impulse`, normalize to unit peak and clamp.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NoImpulseSelected`] if `impulse` is `None`
    /// - [`ValidationError::SampleRateMismatch`] if the rates differ
    /// - [`ValidationError::SilentResult`] for an all-zero result under
    ///   [`SilencePolicy::Reject`]; a zero-frame input gives `m - 1` zero
    ///   frames and takes this path too
    /// - [`Error::Processing`] if the output or FFT buffers cannot be
    ///   allocated
    pub fn apply(
        &self,
        buffer: &AudioBuffer,
        impulse: Option<&ImpulseResponse>,
    ) -> Result<AudioBuffer> {
        let impulse = impulse.ok_or(ValidationError::NoImpulseSelected)?;
        if impulse.sample_rate() != buffer.sample_rate() {
            return Err(ValidationError::SampleRateMismatch {
                expected: buffer.sample_rate(),
                found: impulse.sample_rate(),
            }
            .into());
        }

        let kernel = impulse.samples();
        let use_fft = buffer.len().saturating_mul(kernel.len()) > self.fft_threshold;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            frames = buffer.len(),
            kernel = kernel.len(),
            channels = buffer.channel_count(),
            fft = use_fft,
            "convolution: start"
        );

        let channels = if use_fft {
            let convolver = FftConvolver::new(kernel, buffer.len())?;
            buffer
                .channels()
                .map(|c| convolver.convolve(c))
                .collect::<Result<Vec<_>>>()?
        } else {
            buffer
                .channels()
                .map(|c| convolve_direct(c, kernel))
                .collect::<Result<Vec<_>>>()?
        };

        let mut output = AudioBuffer::from_channels(channels, buffer.sample_rate())?;
        let peak = output.peak();

        if peak == 0.0 {
            return match self.silence {
                SilencePolicy::Passthrough => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("convolution: result is silent, skipping normalization");
                    Ok(output)
                }
                SilencePolicy::Reject => Err(ValidationError::SilentResult.into()),
            };
        }
        if !peak.is_finite() {
            return Err(Error::Processing(
                "convolution produced non-finite samples".to_string(),
            ));
        }

        for index in 0..output.channel_count() {
            for sample in output.channel_mut(index) {
                // Divide rather than multiply by 1/peak so the peak maps to exactly 1.0
                *sample /= peak;
            }
        }
        output.clamp_in_place();
        Ok(output)
    }
}

/// Full linear convolution in the time domain.
///
/// Returns `signal.len() + kernel.len() - 1` samples. An empty signal
/// yields `kernel.len() - 1` zeros; an empty kernel yields nothing.
/// Fails with [`Error::Processing`] when the output cannot be allocated.
pub fn convolve_direct(signal: &[f32], kernel: &[f32]) -> Result<Vec<f32>> {
    if kernel.is_empty() {
        return Ok(Vec::new());
    }
    let mut output = zeroed(full_len(signal.len(), kernel.len())?, 0.0)?;
    for (i, &s) in signal.iter().enumerate() {
        if s == 0.0 {
            continue;
        }
        for (out, &k) in output[i..].iter_mut().zip(kernel) {
            *out += s * k;
        }
    }
    Ok(output)
}

/// `n + m - 1` for a non-empty kernel of length `m`.
fn full_len(signal_len: usize, kernel_len: usize) -> Result<usize> {
    signal_len
        .checked_add(kernel_len - 1)
        .ok_or_else(|| {
            Error::Processing(format!(
                "convolution output length overflows ({signal_len} + {kernel_len} - 1 frames)"
            ))
        })
}

/// FFT convolution against a fixed kernel.
///
/// The kernel spectrum is computed once and reused for every channel.
struct FftConvolver {
    fft: Arc<dyn Fft<f32>>,
    ifft: Arc<dyn Fft<f32>>,
    kernel_spectrum: Vec<Complex<f32>>,
    kernel_len: usize,
    size: usize,
}

impl FftConvolver {
    fn new(kernel: &[f32], signal_len: usize) -> Result<Self> {
        let size = full_len(signal_len, kernel.len().max(1))?
            .max(1)
            .checked_next_power_of_two()
            .ok_or_else(|| {
                Error::Processing(format!("cannot size an FFT for {signal_len} frames"))
            })?;

        // Allocate before planning so an oversized transform fails cleanly
        let mut kernel_spectrum = to_complex(kernel, size)?;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);
        fft.process(&mut kernel_spectrum);

        Ok(Self {
            fft,
            ifft,
            kernel_spectrum,
            kernel_len: kernel.len(),
            size,
        })
    }

    fn convolve(&self, signal: &[f32]) -> Result<Vec<f32>> {
        if self.kernel_len == 0 {
            return Ok(Vec::new());
        }
        if signal.is_empty() {
            return zeroed(self.kernel_len - 1, 0.0);
        }
        let out_len = full_len(signal.len(), self.kernel_len)?;

        let mut spectrum = to_complex(signal, self.size)?;
        self.fft.process(&mut spectrum);
        for (s, k) in spectrum.iter_mut().zip(&self.kernel_spectrum) {
            *s *= *k;
        }
        self.ifft.process(&mut spectrum);

        let scale = 1.0 / self.size as f32;
        let mut output = zeroed(out_len, 0.0)?;
        for (out, c) in output.iter_mut().zip(&spectrum) {
            *out = c.re * scale;
        }
        Ok(output)
    }
}

fn to_complex(samples: &[f32], size: usize) -> Result<Vec<Complex<f32>>> {
    let mut buffer = zeroed(size, Complex::new(0.0, 0.0))?;
    for (slot, &x) in buffer.iter_mut().zip(samples) {
        slot.re = x;
    }
    Ok(buffer)
}
