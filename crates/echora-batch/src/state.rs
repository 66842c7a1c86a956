//! Mutable batch accounting shared by workers.

use crate::{BatchReport, JobFailure, Progress};
use std::time::Instant;

/// Counters and failures accumulated while a batch runs.
///
/// Lives behind one lock; every update records exactly one job, so the
/// completed count and the failure list never disagree.
#[derive(Debug)]
pub(crate) struct BatchState {
    total: usize,
    completed: usize,
    succeeded: usize,
    errors: Vec<JobFailure>,
    started: Instant,
    finalized: bool,
}

impl BatchState {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            succeeded: 0,
            errors: Vec::new(),
            started: Instant::now(),
            finalized: false,
        }
    }

    /// Record one finished job. `None` means success.
    pub(crate) fn record(&mut self, failure: Option<JobFailure>) -> Progress {
        debug_assert!(self.completed < self.total, "more results than jobs");
        self.completed += 1;
        match failure {
            None => self.succeeded += 1,
            Some(failure) => self.errors.push(failure),
        }
        self.progress()
    }

    pub(crate) fn progress(&self) -> Progress {
        Progress {
            completed: self.completed,
            total: self.total,
        }
    }

    /// Build the final report once every job is recorded.
    ///
    /// Returns `None` while jobs are outstanding and on every call after
    /// the first successful one.
    pub(crate) fn finalize(&mut self) -> Option<BatchReport> {
        if self.finalized || self.completed < self.total {
            return None;
        }
        self.finalized = true;

        let mut errors = std::mem::take(&mut self.errors);
        errors.sort_by_key(|e| e.job_id);
        Some(BatchReport {
            total: self.total,
            succeeded: self.succeeded,
            errors,
            elapsed: self.started.elapsed(),
        })
    }
}
