//! Concurrent batch processing for echora.
//!
//! A batch is a list of [`ProcessingJob`]s sharing one effect. The
//! [`BatchProcessor`] runs them on a bounded rayon pool:
//!
//! - each job reads, transforms, and writes its own file; failures are
//!   recorded per job and never abort the batch
//! - shared accounting sits behind a single lock, so completion counts
//!   reach the [`ProgressSink`] in strict order
//! - the worker that records the last job builds the [`BatchReport`] and
//!   fires [`ProgressSink::on_batch_complete`] exactly once
//! - a [`CancellationToken`] stops new jobs from starting; skipped jobs
//!   are reported as cancelled

mod cancel;
mod error;
mod job;
mod processor;
mod progress;
mod report;
mod state;

pub use cancel::CancellationToken;
pub use error::{BatchError, FailureKind, JobError};
pub use job::ProcessingJob;
pub use processor::{BatchProcessor, JobSummary};
pub use progress::{ChannelProgress, FnProgress, NoProgress, Progress, ProgressEvent, ProgressSink};
pub use report::{BatchOutcome, BatchReport, JobFailure};
