//! Concurrent multi-file processing command.

use super::common::{self, EchoOpts, ImpulseOpts, Mode};
use clap::Args;
use echora_batch::{
    BatchOutcome, BatchProcessor, BatchReport, CancellationToken, ProcessingJob, Progress,
    ProgressSink,
};
use echora_config::{JobConfig, OutputNaming, find_config};
use indicatif::ProgressBar;
use std::path::PathBuf;

/// Process many files concurrently with one effect.
#[derive(Args)]
pub struct BatchArgs {
    /// Input WAV files
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for output files (defaults to each input's directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Suffix appended to each output file name
    #[arg(long)]
    suffix: Option<String>,

    /// Effect to apply (inferred from the other flags when omitted)
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    #[command(flatten)]
    echo: EchoOpts,

    #[command(flatten)]
    impulse: ImpulseOpts,

    /// Maximum files processed at once (defaults to the CPU count)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long)]
    bit_depth: Option<u16>,

    /// Job configuration file (TOML); flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

/// Progress sink driving an indicatif bar.
struct BarProgress {
    bar: ProgressBar,
}

impl ProgressSink for BarProgress {
    fn on_progress(&self, progress: Progress) {
        self.bar.set_position(progress.completed as u64);
    }

    fn on_batch_complete(&self, report: &BatchReport) {
        let message = match report.outcome() {
            BatchOutcome::Succeeded | BatchOutcome::Empty => "done".to_string(),
            _ => format!("{} failed", report.failed()),
        };
        self.bar.finish_with_message(message);
    }
}

/// Run the batch command.
pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let loaded = match find_config(args.config.as_deref()) {
        Some(path) => {
            tracing::info!(config = %path.display(), "loading job configuration");
            Some(JobConfig::load(&path)?)
        }
        None => None,
    };

    // Bad effect parameters fail here, before any audio is read.
    let effect = common::effect_settings(args.mode, &args.echo, &args.impulse, loaded.as_ref())?;

    // Flag paths are relative to the working directory, config paths to
    // the config file.
    let config_dir = loaded
        .as_ref()
        .and_then(|c| c.output.dir.as_deref().map(|d| c.resolve_path(d)));

    let mut config = loaded.unwrap_or_else(|| JobConfig::new(effect.clone()));
    config.effect = effect;
    if let Some(dir) = &args.output_dir {
        config.output.dir = Some(dir.clone());
    }
    if let Some(suffix) = &args.suffix {
        config.output.suffix.clone_from(suffix);
    }
    if let Some(bits) = args.bit_depth {
        config.output.bit_depth = bits;
    }
    if args.jobs.is_some() {
        config.batch.jobs = args.jobs;
    }
    config.validate()?;

    let naming = OutputNaming::new(
        args.output_dir.clone().or(config_dir),
        config.output.suffix.clone(),
    );

    let mode = common::effect_mode(&config.effect)?;
    mode.validate()?;

    let outputs = naming.plan(&args.inputs)?;
    naming.ensure_dir()?;
    let jobs = ProcessingJob::from_pairs(args.inputs.iter().cloned().zip(outputs), &mode);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nCancelling; running files will finish...");
        on_interrupt.cancel();
    })?;

    let mut processor = BatchProcessor::new(common::codec(config.output.bit_depth)?)
        .with_transformer(common::transformer_for(&config.effect))
        .with_cancellation(cancel);
    if let Some(workers) = config.batch.jobs {
        processor = processor.with_concurrency(workers);
    }

    println!(
        "Processing {} file(s) with {} on {} worker(s)...",
        jobs.len(),
        mode.name(),
        processor.workers().min(jobs.len().max(1))
    );

    let bar = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(jobs.len() as u64)
    };
    bar.set_style(common::progress_style()?);
    let sink = BarProgress { bar };

    let report = processor.run_batch(jobs, &sink)?;

    println!("{}", report.summary(config.batch.max_listed_errors));
    if report.cancelled() > 0 {
        println!("{} file(s) skipped after cancellation.", report.cancelled());
    }

    if !report.is_success() {
        anyhow::bail!("{} of {} files failed", report.failed(), report.total);
    }
    Ok(())
}
