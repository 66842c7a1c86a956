//! Single-file convolution command.

use super::common::{self, EchoOpts, ImpulseOpts, Mode};
use clap::Args;
use echora_batch::{BatchProcessor, ProcessingJob};
use echora_core::EffectMode;
use std::path::PathBuf;

/// Convolve one file with an impulse response.
#[derive(Args)]
pub struct ConvolveArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    impulse: ImpulseOpts,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

/// Run the convolve command.
pub fn run(args: ConvolveArgs) -> anyhow::Result<()> {
    let settings = common::effect_settings(
        Some(Mode::Convolution),
        &EchoOpts::default(),
        &args.impulse,
        None,
    )?;
    let mode = common::effect_mode(&settings)?;
    mode.validate()?;

    if let EffectMode::Convolution { impulse: Some(ir) } = &mode {
        println!("Impulse: {} taps at {} Hz", ir.len(), ir.sample_rate());
    }

    let processor = BatchProcessor::new(common::codec(args.bit_depth)?)
        .with_transformer(common::transformer_for(&settings));
    let job = ProcessingJob::new(0, &args.input, &args.output, mode);
    let summary = processor.run_single(&job)?;

    println!(
        "Wrote {} ({} frames)",
        args.output.display(),
        summary.output_frames
    );
    Ok(())
}
