//! Error types for batch processing.

use echora_core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single job. Recorded in the batch report; never aborts
/// sibling jobs.
#[derive(Debug, Error)]
pub enum JobError {
    /// The input file could not be read or decoded.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: echora_io::Error,
    },

    /// The effect rejected the audio or failed while processing it.
    #[error(transparent)]
    Transform(#[from] echora_core::Error),

    /// The output file could not be written.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: echora_io::Error,
    },

    /// The batch was cancelled before this job started.
    #[error("cancelled before processing started")]
    Cancelled,
}

impl JobError {
    /// Classify the error for reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            JobError::Read { .. } => FailureKind::Read,
            JobError::Transform(echora_core::Error::Validation(_)) => FailureKind::Validation,
            JobError::Transform(_) => FailureKind::Processing,
            JobError::Write { .. } => FailureKind::Write,
            JobError::Cancelled => FailureKind::Cancelled,
        }
    }
}

/// Coarse category of a job failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Reading or decoding the input.
    Read,
    /// The effect rejected the audio (e.g. sample-rate mismatch).
    Validation,
    /// Unexpected failure while processing.
    Processing,
    /// Writing or encoding the output.
    Write,
    /// Skipped because the batch was cancelled.
    Cancelled,
}

/// Errors that stop a batch before any job runs.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The effect configuration is unusable.
    #[error("invalid effect configuration: {0}")]
    Validation(#[from] ValidationError),

    /// The worker pool could not be created.
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),

    /// Workers stopped without reporting completion.
    #[error("batch ended after {completed} of {total} jobs without completing")]
    Incomplete {
        /// Jobs recorded before the batch ended.
        completed: usize,
        /// Jobs submitted.
        total: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_classify_variants() {
        let read = JobError::Read {
            path: PathBuf::from("in.wav"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into(),
        };
        assert_eq!(read.kind(), FailureKind::Read);
        assert!(read.to_string().contains("in.wav"));

        let validation = JobError::Transform(ValidationError::NoImpulseSelected.into());
        assert_eq!(validation.kind(), FailureKind::Validation);

        let processing = JobError::Transform(echora_core::Error::Processing("boom".into()));
        assert_eq!(processing.kind(), FailureKind::Processing);

        assert_eq!(JobError::Cancelled.kind(), FailureKind::Cancelled);
    }
}
