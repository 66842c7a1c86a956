//! Planar audio buffer used for whole-file processing.
//!
//! [`AudioBuffer`] holds one `Vec<f32>` per channel plus the sample rate.
//! Only mono and stereo layouts are supported. Codec code exchanges data
//! in interleaved form via [`AudioBuffer::from_interleaved`] and
//! [`AudioBuffer::to_interleaved`].

use crate::{Error, Result};

/// Maximum number of channels a buffer may carry.
pub const MAX_CHANNELS: usize = 2;

/// A block of audio samples with a fixed sample rate and channel layout.
///
/// Samples are nominally in [-1.0, 1.0]; effects clamp their output to
/// that range, but a freshly constructed buffer is not clamped.
///
/// # Example
///
/// ```rust
/// use echora_core::AudioBuffer;
///
/// let buffer = AudioBuffer::stereo(vec![1.0, 0.5], vec![0.0, 0.5], 48000).unwrap();
/// assert_eq!(buffer.len(), 2);
/// assert_eq!(buffer.to_mono(), vec![0.5, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Build a buffer from per-channel sample vectors.
    ///
    /// Fails with [`Error::Layout`] when there are zero or more than
    /// [`MAX_CHANNELS`] channels, when channel lengths differ, or when the
    /// sample rate is zero.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() || channels.len() > MAX_CHANNELS {
            return Err(Error::Layout(format!(
                "expected 1 or 2 channels, got {}",
                channels.len()
            )));
        }
        if sample_rate == 0 {
            return Err(Error::Layout("sample rate must be positive".to_string()));
        }
        let len = channels[0].len();
        if channels.iter().any(|c| c.len() != len) {
            return Err(Error::Layout(
                "all channels must have the same length".to_string(),
            ));
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Build a mono buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        Self::from_channels(vec![samples], sample_rate)
    }

    /// Build a stereo buffer from left and right channels.
    pub fn stereo(left: Vec<f32>, right: Vec<f32>, sample_rate: u32) -> Result<Self> {
        Self::from_channels(vec![left, right], sample_rate)
    }

    /// Deinterleave frames (L, R, L, R, ...) into a planar buffer.
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(interleaved: &[f32], channel_count: usize, sample_rate: u32) -> Result<Self> {
        if channel_count == 0 || channel_count > MAX_CHANNELS {
            return Err(Error::Layout(format!(
                "expected 1 or 2 channels, got {channel_count}"
            )));
        }
        let frames = interleaved.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in interleaved.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::from_channels(channels, sample_rate)
    }

    /// A zero-filled buffer with the same layout and sample rate as `self`.
    ///
    /// Fails with [`Error::Processing`] when `len` frames cannot be
    /// allocated.
    pub fn silent_like(&self, len: usize) -> Result<Self> {
        let channels = (0..self.channels.len())
            .map(|_| zeroed(len, 0.0))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            channels,
            sample_rate: self.sample_rate,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels (1 or 2).
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    /// Check if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / f64::from(self.sample_rate)
    }

    /// Samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= channel_count()`.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Mutable samples of one channel.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    /// Iterate over the channels.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Consume the buffer and return its channels.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Mix down to mono by averaging channels.
    pub fn to_mono(&self) -> Vec<f32> {
        if self.channels.len() == 1 {
            return self.channels[0].clone();
        }
        let scale = 1.0 / self.channels.len() as f32;
        (0..self.len())
            .map(|i| self.channels.iter().map(|c| c[i]).sum::<f32>() * scale)
            .collect()
    }

    /// Convert to interleaved format (L, R, L, R, ...).
    pub fn to_interleaved(&self) -> Vec<f32> {
        if self.channels.len() == 1 {
            return self.channels[0].clone();
        }
        let mut interleaved = Vec::with_capacity(self.len() * self.channels.len());
        for i in 0..self.len() {
            for channel in &self.channels {
                interleaved.push(channel[i]);
            }
        }
        interleaved
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0, |acc: f32, s| acc.max(s.abs()))
    }

    /// Clamp every sample to [-1.0, 1.0].
    pub fn clamp_in_place(&mut self) {
        for sample in self.channels.iter_mut().flatten() {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }
}

/// A vector of `len` copies of `zero`, or [`Error::Processing`] when the
/// allocation cannot be satisfied.
pub(crate) fn zeroed<T: Clone>(len: usize, zero: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| Error::Processing(format!("cannot allocate {len} frames")))?;
    v.resize(len, zero);
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_layouts() {
        assert!(AudioBuffer::from_channels(vec![], 44100).is_err());
        assert!(AudioBuffer::from_channels(vec![vec![0.0]; 3], 44100).is_err());
        assert!(AudioBuffer::stereo(vec![0.0; 2], vec![0.0; 3], 44100).is_err());
        assert!(AudioBuffer::mono(vec![0.0], 0).is_err());
    }

    #[test]
    fn interleaved_roundtrip() {
        let buffer = AudioBuffer::from_interleaved(&[1.0, 2.0, 3.0, 4.0], 2, 48000).unwrap();
        assert_eq!(buffer.channel(0), &[1.0, 3.0]);
        assert_eq!(buffer.channel(1), &[2.0, 4.0]);
        assert_eq!(buffer.to_interleaved(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn interleaved_drops_partial_frame() {
        let buffer = AudioBuffer::from_interleaved(&[1.0, 2.0, 3.0], 2, 48000).unwrap();
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn mono_mixdown_averages() {
        let buffer = AudioBuffer::stereo(vec![1.0, 2.0], vec![3.0, 4.0], 48000).unwrap();
        assert_eq!(buffer.to_mono(), vec![2.0, 3.0]);
    }

    #[test]
    fn peak_and_clamp() {
        let mut buffer = AudioBuffer::stereo(vec![0.5, -1.5], vec![2.0, 0.0], 48000).unwrap();
        assert_eq!(buffer.peak(), 2.0);
        buffer.clamp_in_place();
        assert_eq!(buffer.channel(0), &[0.5, -1.0]);
        assert_eq!(buffer.channel(1), &[1.0, 0.0]);
    }

    #[test]
    fn silent_like_keeps_layout() {
        let buffer = AudioBuffer::stereo(vec![1.0], vec![1.0], 44100).unwrap();
        let silent = buffer.silent_like(4).unwrap();
        assert_eq!(silent.channel_count(), 2);
        assert_eq!(silent.sample_rate(), 44100);
        assert_eq!(silent.channel(1), &[0.0; 4]);
    }

    #[test]
    fn silent_like_reports_unallocatable_length() {
        let buffer = AudioBuffer::mono(vec![1.0], 44100).unwrap();
        let err = buffer.silent_like(usize::MAX).unwrap_err();
        assert!(matches!(err, Error::Processing(ref msg) if msg.contains("cannot allocate")));
    }
}
