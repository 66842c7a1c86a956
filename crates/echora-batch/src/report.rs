//! Batch outcome accounting.

use crate::{FailureKind, JobError};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A job that did not produce its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    /// Submission index of the job.
    pub job_id: usize,
    /// Input file of the job.
    pub input: PathBuf,
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable cause.
    pub message: String,
}

impl JobFailure {
    /// Record `error` against a job.
    pub fn new(job_id: usize, input: &Path, error: &JobError) -> Self {
        Self {
            job_id,
            input: input.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// How a batch ended overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// No jobs were submitted.
    Empty,
    /// Every job succeeded.
    Succeeded,
    /// Some jobs succeeded, some failed.
    Partial,
    /// Every job failed.
    Failed,
}

/// Final accounting for a batch.
///
/// `succeeded + errors.len() == total` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Jobs submitted.
    pub total: usize,
    /// Jobs that wrote their output.
    pub succeeded: usize,
    /// Failed jobs, in submission order.
    pub errors: Vec<JobFailure>,
    /// Wall time from first job start to last job end.
    pub elapsed: Duration,
}

impl BatchReport {
    /// Report for a batch with no jobs.
    pub fn empty() -> Self {
        Self {
            total: 0,
            succeeded: 0,
            errors: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Number of failed jobs.
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    /// Number of jobs skipped by cancellation.
    pub fn cancelled(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.kind == FailureKind::Cancelled)
            .count()
    }

    /// Overall classification.
    pub fn outcome(&self) -> BatchOutcome {
        match (self.total, self.succeeded) {
            (0, _) => BatchOutcome::Empty,
            (total, ok) if ok == total => BatchOutcome::Succeeded,
            (_, 0) => BatchOutcome::Failed,
            _ => BatchOutcome::Partial,
        }
    }

    /// True when nothing failed.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Multi-line summary listing at most `max_listed` failures.
    pub fn summary(&self, max_listed: usize) -> String {
        let mut out = match self.outcome() {
            BatchOutcome::Empty => return "No files to process.".to_string(),
            BatchOutcome::Succeeded => {
                format!("All {} files processed successfully.", self.total)
            }
            BatchOutcome::Failed => format!("All {} files failed:", self.total),
            BatchOutcome::Partial => format!(
                "{} of {} files processed, {} failed:",
                self.succeeded,
                self.total,
                self.failed()
            ),
        };

        for failure in self.errors.iter().take(max_listed) {
            let _ = write!(out, "\n  {}: {}", failure.input.display(), failure.message);
        }
        let hidden = self.failed().saturating_sub(max_listed);
        if hidden > 0 {
            let _ = write!(out, "\n  ... and {} more", hidden);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(id: usize) -> JobFailure {
        JobFailure {
            job_id: id,
            input: PathBuf::from(format!("in{id}.wav")),
            kind: FailureKind::Read,
            message: "missing".to_string(),
        }
    }

    fn report(total: usize, failed: usize) -> BatchReport {
        BatchReport {
            total,
            succeeded: total - failed,
            errors: (0..failed).map(failure).collect(),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn outcomes() {
        assert_eq!(BatchReport::empty().outcome(), BatchOutcome::Empty);
        assert_eq!(report(3, 0).outcome(), BatchOutcome::Succeeded);
        assert_eq!(report(3, 1).outcome(), BatchOutcome::Partial);
        assert_eq!(report(3, 3).outcome(), BatchOutcome::Failed);
        assert!(report(3, 0).is_success());
        assert!(!report(3, 1).is_success());
    }

    #[test]
    fn summary_lists_failures() {
        let text = report(5, 2).summary(10);
        assert!(text.starts_with("3 of 5 files processed, 2 failed:"));
        assert!(text.contains("in0.wav: missing"));
        assert!(text.contains("in1.wav: missing"));
        assert!(!text.contains("more"));
    }

    #[test]
    fn summary_truncates() {
        let text = report(6, 6).summary(2);
        assert!(text.starts_with("All 6 files failed:"));
        assert_eq!(text.lines().count(), 4);
        assert!(text.ends_with("... and 4 more"));
    }

    #[test]
    fn summary_for_clean_and_empty_batches() {
        assert_eq!(
            report(2, 0).summary(5),
            "All 2 files processed successfully."
        );
        assert_eq!(BatchReport::empty().summary(5), "No files to process.");
    }

    #[test]
    fn cancelled_count() {
        let mut r = report(3, 2);
        r.errors[1].kind = FailureKind::Cancelled;
        assert_eq!(r.cancelled(), 1);
        assert_eq!(r.failed(), 2);
    }
}
