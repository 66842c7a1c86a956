//! Property-based tests for echora-core transforms.
//!
//! Tests the echo length and range laws and the convolution length and
//! normalization laws using proptest for randomized input generation.

use echora_core::{
    AudioBuffer, AudioTransformer, ConvolutionEngine, EchoParameters, EchoSynthesizer, EffectMode,
    ImpulseResponse,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Echo output is exactly `len + delay_samples` frames and stays in range.
    #[test]
    fn echo_length_and_range(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 0..512),
        delay_ms in 1i64..500,
        decay in 0.0f32..=1.0f32,
        sample_rate in prop::sample::select(vec![1000u32, 8000, 22050, 44100]),
    ) {
        let params = EchoParameters::new(delay_ms, decay).unwrap();
        let d = params.delay_samples(sample_rate);
        let input = AudioBuffer::mono(samples.clone(), sample_rate).unwrap();
        let output = EchoSynthesizer::new(params).apply(&input).unwrap();

        prop_assert_eq!(output.len(), samples.len() + d);
        for &s in output.channel(0) {
            prop_assert!((-1.0..=1.0).contains(&s), "sample {} out of range", s);
        }
    }

    /// Applying the same echo twice extends the buffer by twice the delay.
    #[test]
    fn echo_twice_composes_length(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 1..256),
        delay_ms in 1i64..200,
        decay in 0.0f32..=1.0f32,
    ) {
        let params = EchoParameters::new(delay_ms, decay).unwrap();
        let d = params.delay_samples(8000);
        let echo = EchoSynthesizer::new(params);
        let input = AudioBuffer::mono(samples.clone(), 8000).unwrap();
        let twice = echo.apply(&echo.apply(&input).unwrap()).unwrap();

        prop_assert_eq!(twice.len(), samples.len() + 2 * d);
    }

    /// With zero decay the input is reproduced and the tail is silent.
    #[test]
    fn echo_zero_decay_is_identity_plus_silence(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 0..256),
        delay_ms in 1i64..100,
    ) {
        let params = EchoParameters::new(delay_ms, 0.0).unwrap();
        let input = AudioBuffer::mono(samples.clone(), 8000).unwrap();
        let output = EchoSynthesizer::new(params).apply(&input).unwrap();

        prop_assert_eq!(&output.channel(0)[..samples.len()], samples.as_slice());
        prop_assert!(output.channel(0)[samples.len()..].iter().all(|&s| s == 0.0));
    }

    /// Stereo echo preserves layout and extends both channels equally.
    #[test]
    fn echo_stereo_preserves_layout(
        frames in prop::collection::vec((-1.0f32..=1.0f32, -1.0f32..=1.0f32), 0..256),
        delay_ms in 1i64..100,
        decay in 0.0f32..=1.0f32,
    ) {
        let (left, right): (Vec<f32>, Vec<f32>) = frames.iter().copied().unzip();
        let input = AudioBuffer::stereo(left, right, 8000).unwrap();
        let params = EchoParameters::new(delay_ms, decay).unwrap();
        let output = EchoSynthesizer::new(params).apply(&input).unwrap();

        prop_assert_eq!(output.channel_count(), 2);
        prop_assert_eq!(output.len(), frames.len() + params.delay_samples(8000));
    }

    /// Convolution output is `n + m - 1` frames with a peak of exactly 1.0
    /// whenever the raw result is not silent.
    #[test]
    fn convolution_length_and_normalization(
        signal in prop::collection::vec(-1.0f32..=1.0f32, 0..200),
        kernel in prop::collection::vec(-1.0f32..=1.0f32, 1..64),
        force_fft in any::<bool>(),
    ) {
        let n = signal.len();
        let m = kernel.len();
        let raw_peak = echora_core::convolve_direct(&signal, &kernel)
            .unwrap()
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));

        let input = AudioBuffer::mono(signal, 1000).unwrap();
        let ir = ImpulseResponse::new(kernel, 1000).unwrap();
        let engine = if force_fft {
            ConvolutionEngine::new().with_fft_threshold(0)
        } else {
            ConvolutionEngine::new()
        };
        let output = engine.apply(&input, Some(&ir)).unwrap();

        prop_assert_eq!(output.len(), n + m - 1);
        prop_assert!(output.peak() <= 1.0);
        if !force_fft && raw_peak > 0.0 {
            prop_assert_eq!(output.peak(), 1.0);
        }
    }

    /// The transformer picks the same result as calling the engine directly.
    #[test]
    fn transformer_matches_direct_echo(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 0..128),
        delay_ms in 1i64..50,
        decay in 0.0f32..=1.0f32,
    ) {
        let params = EchoParameters::new(delay_ms, decay).unwrap();
        let input = AudioBuffer::mono(samples, 8000).unwrap();
        let via_transformer = AudioTransformer::default()
            .transform(&input, &EffectMode::Echo(params))
            .unwrap();
        let direct = EchoSynthesizer::new(params).apply(&input).unwrap();
        prop_assert_eq!(via_transformer, direct);
    }
}
