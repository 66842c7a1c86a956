//! Concurrent batch orchestration.

use crate::state::BatchState;
use crate::{
    BatchError, BatchReport, CancellationToken, JobError, JobFailure, ProcessingJob, ProgressSink,
};
use echora_core::AudioTransformer;
use echora_io::AudioCodec;
use parking_lot::Mutex;
use rayon::ThreadPoolBuilder;

/// What a successful job produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSummary {
    /// Frames read from the input.
    pub input_frames: usize,
    /// Frames written to the output.
    pub output_frames: usize,
}

/// Runs [`ProcessingJob`]s on a bounded worker pool.
///
/// Each job reads, transforms, and writes independently; a failing job is
/// recorded and never stops its siblings. Progress and completion are
/// reported through a [`ProgressSink`].
///
/// ```rust,no_run
/// use echora_batch::{BatchProcessor, NoProgress, ProcessingJob};
/// use echora_core::{EchoParameters, EffectMode};
/// use echora_io::WavCodec;
///
/// let effect = EffectMode::Echo(EchoParameters::new(250, 0.4).unwrap());
/// let jobs = ProcessingJob::from_pairs([("a.wav", "a_echo.wav")], &effect);
/// let report = BatchProcessor::new(WavCodec::default())
///     .run_batch(jobs, &NoProgress)
///     .unwrap();
/// println!("{}", report.summary(10));
/// ```
#[derive(Debug)]
pub struct BatchProcessor<C> {
    codec: C,
    transformer: AudioTransformer,
    concurrency: Option<usize>,
    cancel: CancellationToken,
}

impl<C: AudioCodec> BatchProcessor<C> {
    /// Processor using `codec` for all reads and writes.
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            transformer: AudioTransformer::default(),
            concurrency: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Use a specific transformer configuration.
    pub fn with_transformer(mut self, transformer: AudioTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    /// Cap the number of jobs in flight. `0` falls back to one worker.
    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.concurrency = Some(workers);
        self
    }

    /// Observe `token` for cancellation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Token that cancels this processor's batches.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Worker count: the configured cap, or one per logical CPU.
    pub fn workers(&self) -> usize {
        self.concurrency.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Run every job and return the final report.
    ///
    /// Effect settings are validated up front; an unusable effect fails the
    /// whole batch before any file is touched. After that, per-job
    /// failures only appear in the report. `sink` receives one progress
    /// call per job and exactly one completion call.
    pub fn run_batch(
        &self,
        jobs: Vec<ProcessingJob>,
        sink: &dyn ProgressSink,
    ) -> Result<BatchReport, BatchError> {
        for job in &jobs {
            job.effect().validate()?;
        }

        let total = jobs.len();
        if total == 0 {
            tracing::info!("batch has no jobs");
            let report = BatchReport::empty();
            sink.on_batch_complete(&report);
            return Ok(report);
        }

        let workers = self.workers().min(total);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("echora-worker-{i}"))
            .build()
            .map_err(|e| BatchError::ThreadPool(e.to_string()))?;

        tracing::info!(jobs = total, workers, "batch started");

        let state = Mutex::new(BatchState::new(total));
        let (done_tx, done_rx) = crossbeam_channel::bounded::<BatchReport>(1);

        pool.scope(|scope| {
            for job in jobs {
                let state = &state;
                let done_tx = done_tx.clone();
                scope.spawn(move |_| {
                    let failure = self
                        .run_job(&job)
                        .err()
                        .map(|e| JobFailure::new(job.id(), job.input(), &e));

                    let report = {
                        let mut state = state.lock();
                        let progress = state.record(failure);
                        sink.on_progress(progress);
                        state.finalize()
                    };

                    if let Some(report) = report {
                        sink.on_batch_complete(&report);
                        let _ = done_tx.send(report);
                    }
                });
            }
        });
        drop(done_tx);

        let report = done_rx.recv().map_err(|_| {
            let progress = state.lock().progress();
            BatchError::Incomplete {
                completed: progress.completed,
                total: progress.total,
            }
        })?;

        tracing::info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "batch finished"
        );
        if report.cancelled() > 0 {
            tracing::warn!(skipped = report.cancelled(), "batch cancelled");
        }
        Ok(report)
    }

    /// Run one job on the calling thread, returning its error directly.
    pub fn run_single(&self, job: &ProcessingJob) -> Result<JobSummary, JobError> {
        job.effect()
            .validate()
            .map_err(|e| JobError::Transform(e.into()))?;
        self.process(job)
    }

    fn run_job(&self, job: &ProcessingJob) -> Result<JobSummary, JobError> {
        if self.cancel.is_cancelled() {
            tracing::debug!(job = job.id(), "skipped after cancellation");
            return Err(JobError::Cancelled);
        }
        let result = self.process(job);
        if let Err(e) = &result {
            tracing::warn!(job = job.id(), input = %job.input().display(), "job failed: {e}");
        }
        result
    }

    fn process(&self, job: &ProcessingJob) -> Result<JobSummary, JobError> {
        let input = self
            .codec
            .read(job.input())
            .map_err(|source| JobError::Read {
                path: job.input().to_path_buf(),
                source,
            })?;

        let output = self.transformer.transform(&input, job.effect())?;

        self.codec
            .write(job.output(), &output)
            .map_err(|source| JobError::Write {
                path: job.output().to_path_buf(),
                source,
            })?;

        tracing::debug!(
            job = job.id(),
            effect = job.effect().name(),
            input_frames = input.len(),
            output_frames = output.len(),
            "job complete"
        );
        Ok(JobSummary {
            input_frames: input.len(),
            output_frames: output.len(),
        })
    }
}
