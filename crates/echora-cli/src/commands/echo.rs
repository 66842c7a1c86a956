//! Single-file echo command.

use super::common;
use clap::Args;
use echora_batch::{BatchProcessor, ProcessingJob};
use echora_core::{EffectMode, validate};
use std::path::PathBuf;

/// Add a decaying echo to one file.
#[derive(Args)]
pub struct EchoArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Echo delay in milliseconds (positive integer)
    #[arg(long, value_name = "MS", allow_hyphen_values = true)]
    delay: String,

    /// Echo decay factor between 0.0 and 1.0
    #[arg(long, value_name = "FACTOR", allow_hyphen_values = true)]
    decay: String,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

/// Run the echo command.
pub fn run(args: EchoArgs) -> anyhow::Result<()> {
    let params = validate(&args.delay, &args.decay)?;
    let processor = BatchProcessor::new(common::codec(args.bit_depth)?);

    println!(
        "Echo: {} ms delay, {:.2} decay",
        params.delay_ms(),
        params.decay()
    );
    let job = ProcessingJob::new(0, &args.input, &args.output, EffectMode::Echo(params));
    let summary = processor.run_single(&job)?;

    println!(
        "Wrote {} ({} frames, {} added)",
        args.output.display(),
        summary.output_frames,
        summary.output_frames - summary.input_frames
    );
    Ok(())
}
