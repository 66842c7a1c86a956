//! Echo parameters and validation of user-supplied parameter text.
//!
//! [`validate`] is the single entry point shells use to turn free-form
//! delay/decay text into [`EchoParameters`]. Every rejection is a typed
//! [`ValidationError`] raised before any audio is touched.

use crate::ValidationError;
use std::num::IntErrorKind;

/// Validated echo settings.
///
/// `delay_ms` is strictly positive and `decay` lies in [0.0, 1.0]. The only
/// way to obtain an instance is through [`EchoParameters::new`] or
/// [`validate`], so synthesis code can rely on both invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EchoParameters {
    delay_ms: u32,
    decay: f32,
}

impl EchoParameters {
    /// Validate numeric echo settings.
    ///
    /// Delays above `u32::MAX` milliseconds are rejected with
    /// [`ValidationError::DelayOutOfRange`].
    pub fn new(delay_ms: i64, decay: f32) -> Result<Self, ValidationError> {
        if delay_ms <= 0 {
            return Err(ValidationError::NonPositiveDelay(delay_ms));
        }
        let delay_ms = u32::try_from(delay_ms)
            .map_err(|_| ValidationError::DelayOutOfRange(delay_ms.to_string()))?;
        if !(0.0..=1.0).contains(&decay) {
            return Err(ValidationError::DecayOutOfRange(decay));
        }
        Ok(Self { delay_ms, decay })
    }

    /// Delay in milliseconds.
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Attenuation applied to the delayed copy.
    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Delay in whole samples: `floor(delay_ms / 1000 * sample_rate)`.
    ///
    /// Computed in integer arithmetic so the floor is exact.
    pub fn delay_samples(&self, sample_rate: u32) -> usize {
        (u64::from(self.delay_ms) * u64::from(sample_rate) / 1000) as usize
    }
}

/// Parse and validate delay/decay text.
///
/// Delay must parse as an integer number of milliseconds and decay as a
/// float. Integer text too large for any supported delay is out of range,
/// not malformed. Both fields are parsed before either range is checked, so a
/// malformed decay is reported even when the delay is also out of range.
///
/// # Example
///
/// ```rust
/// use echora_core::{validate, ValidationError};
///
/// let params = validate("250", "0.4").unwrap();
/// assert_eq!(params.delay_samples(1000), 250);
///
/// assert_eq!(validate("0", "0.5"), Err(ValidationError::NonPositiveDelay(0)));
/// ```
pub fn validate(delay_text: &str, decay_text: &str) -> Result<EchoParameters, ValidationError> {
    let delay_ms = delay_text
        .trim()
        .parse::<i64>()
        .map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow => {
                ValidationError::DelayOutOfRange(delay_text.trim().to_string())
            }
            IntErrorKind::NegOverflow => ValidationError::NonPositiveDelay(i64::MIN),
            _ => ValidationError::NotANumber {
                field: "delay",
                input: delay_text.to_string(),
            },
        })?;
    let decay = decay_text
        .trim()
        .parse::<f32>()
        .map_err(|_| ValidationError::NotANumber {
            field: "decay",
            input: decay_text.to_string(),
        })?;
    EchoParameters::new(delay_ms, decay)
}
