//! Echora Core - echo synthesis and impulse-response convolution
//!
//! This crate is the transformation engine behind echora. It works on whole
//! buffers held in memory; file formats and batch orchestration live in
//! `echora-io` and `echora-batch`.
//!
//! # Core Abstractions
//!
//! ## Data
//!
//! - [`AudioBuffer`] - Planar mono/stereo samples with a sample rate
//! - [`EchoParameters`] - Validated delay (ms) and decay
//! - [`ImpulseResponse`] - Mono convolution kernel
//!
//! ## Validation
//!
//! - [`validate`] - Parse delay/decay text into [`EchoParameters`]
//! - [`ValidationError`] - Typed rejection reasons
//!
//! ## Effects
//!
//! - [`EchoSynthesizer`] - Tail-extending single-tap echo
//! - [`ConvolutionEngine`] - Full linear convolution with peak normalization
//! - [`AudioTransformer`] - Dispatches an [`EffectMode`] to a [`Processor`]
//!
//! # Example
//!
//! ```rust
//! use echora_core::{AudioBuffer, AudioTransformer, EffectMode, ImpulseResponse, validate};
//!
//! let input = AudioBuffer::mono(vec![0.5; 1000], 1000).unwrap();
//! let transformer = AudioTransformer::default();
//!
//! // Echo: 200 ms at 1 kHz adds 200 frames of tail
//! let echo = EffectMode::Echo(validate("200", "0.5").unwrap());
//! assert_eq!(transformer.transform(&input, &echo).unwrap().len(), 1200);
//!
//! // Convolution: output is n + m - 1 frames
//! let ir = ImpulseResponse::new(vec![1.0, 0.6, 0.3], 1000).unwrap();
//! let reverb = EffectMode::convolution(ir);
//! assert_eq!(transformer.transform(&input, &reverb).unwrap().len(), 1002);
//! ```

pub mod buffer;
pub mod convolution;
pub mod echo;
pub mod error;
pub mod params;
pub mod transform;

pub use buffer::{AudioBuffer, MAX_CHANNELS};
pub use convolution::{
    ConvolutionEngine, DEFAULT_FFT_THRESHOLD, ImpulseResponse, SilencePolicy, convolve_direct,
};
pub use echo::EchoSynthesizer;
pub use error::{Error, Result, ValidationError};
pub use params::{EchoParameters, validate};
pub use transform::{AudioTransformer, Convolver, EffectMode, Processor};
