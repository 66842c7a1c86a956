//! Effect selection and dispatch.
//!
//! [`AudioTransformer`] is the one code path every caller (single file,
//! preview, batch) goes through. It picks the processor for an
//! [`EffectMode`] and runs it; it adds no processing of its own.
//!
//! New effect families plug in by implementing [`Processor`] and adding an
//! [`EffectMode`] variant; batch orchestration is unaffected.

use crate::{
    AudioBuffer, ConvolutionEngine, EchoParameters, EchoSynthesizer, ImpulseResponse, Result,
    ValidationError,
};
use std::sync::Arc;

/// Object-safe trait for whole-buffer audio processors.
///
/// Processors are immutable once built and may be shared across threads.
pub trait Processor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Produce a new buffer from `input`.
    fn process(&self, input: &AudioBuffer) -> Result<AudioBuffer>;
}

impl Processor for EchoSynthesizer {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn process(&self, input: &AudioBuffer) -> Result<AudioBuffer> {
        self.apply(input)
    }
}

/// A [`ConvolutionEngine`] bound to one impulse response.
#[derive(Debug, Clone)]
pub struct Convolver {
    engine: ConvolutionEngine,
    impulse: Arc<ImpulseResponse>,
}

impl Convolver {
    /// Bind `impulse` to `engine`.
    pub fn new(engine: ConvolutionEngine, impulse: Arc<ImpulseResponse>) -> Self {
        Self { engine, impulse }
    }

    /// The bound impulse response.
    pub fn impulse(&self) -> &ImpulseResponse {
        &self.impulse
    }
}

impl Processor for Convolver {
    fn name(&self) -> &'static str {
        "convolution"
    }

    fn process(&self, input: &AudioBuffer) -> Result<AudioBuffer> {
        self.engine.apply(input, Some(&self.impulse))
    }
}

/// Which effect to apply, with its parameters.
///
/// Echo and convolution are mutually exclusive. The impulse response is
/// reference-counted so a batch can share one kernel across workers.
#[derive(Debug, Clone)]
pub enum EffectMode {
    /// Tail-extending echo.
    Echo(EchoParameters),
    /// Impulse-response convolution. `None` means no impulse was chosen.
    Convolution {
        /// Selected impulse response, if any.
        impulse: Option<Arc<ImpulseResponse>>,
    },
}

impl EffectMode {
    /// Convolution with a selected impulse.
    pub fn convolution(impulse: ImpulseResponse) -> Self {
        Self::Convolution {
            impulse: Some(Arc::new(impulse)),
        }
    }

    /// Short identifier used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Echo(_) => "echo",
            Self::Convolution { .. } => "convolution",
        }
    }

    /// Check that the mode can run at all, before any audio is loaded.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        match self {
            Self::Echo(_) => Ok(()),
            Self::Convolution { impulse: None } => Err(ValidationError::NoImpulseSelected),
            Self::Convolution { impulse: Some(_) } => Ok(()),
        }
    }
}

/// Applies an [`EffectMode`] to a buffer.
///
/// # Example
///
/// ```rust
/// use echora_core::{AudioBuffer, AudioTransformer, EffectMode, validate};
///
/// let transformer = AudioTransformer::default();
/// let input = AudioBuffer::mono(vec![0.5; 100], 1000).unwrap();
/// let mode = EffectMode::Echo(validate("10", "0.5").unwrap());
///
/// let output = transformer.transform(&input, &mode).unwrap();
/// assert_eq!(output.len(), 110);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioTransformer {
    convolution: ConvolutionEngine,
}

impl AudioTransformer {
    /// Transformer using the given convolution engine settings.
    pub fn new(convolution: ConvolutionEngine) -> Self {
        Self { convolution }
    }

    /// Build the processor for `mode`.
    pub fn processor(&self, mode: &EffectMode) -> Result<Box<dyn Processor>> {
        match mode {
            EffectMode::Echo(params) => Ok(Box::new(EchoSynthesizer::new(*params))),
            EffectMode::Convolution { impulse } => {
                let impulse = impulse.clone().ok_or(ValidationError::NoImpulseSelected)?;
                Ok(Box::new(Convolver::new(self.convolution, impulse)))
            }
        }
    }

    /// Apply `mode` to `buffer`.
    pub fn transform(&self, buffer: &AudioBuffer, mode: &EffectMode) -> Result<AudioBuffer> {
        let processor = self.processor(mode)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(effect = processor.name(), frames = buffer.len(), "transform");
        processor.process(buffer)
    }
}
