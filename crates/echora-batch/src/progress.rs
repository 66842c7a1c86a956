//! Progress reporting.
//!
//! Workers report through a [`ProgressSink`] as each job finishes. Calls
//! are serialized by the batch state lock, so a sink sees completion
//! counts strictly in order and never needs its own synchronization for
//! ordering.

use crate::BatchReport;
use crossbeam_channel::Sender;

/// Snapshot of batch completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Jobs finished so far, successful or not.
    pub completed: usize,
    /// Jobs submitted.
    pub total: usize,
}

impl Progress {
    /// Completed fraction in `[0, 1]`. An empty batch counts as done.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Whether every job has been recorded.
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// Receiver of batch progress.
///
/// Both methods are invoked from worker threads.
pub trait ProgressSink: Send + Sync {
    /// A job finished. Called once per job.
    fn on_progress(&self, progress: Progress);

    /// All jobs finished. Called exactly once per batch.
    fn on_batch_complete(&self, _report: &BatchReport) {}
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _progress: Progress) {}
}

/// Sink that forwards progress to a closure.
pub struct FnProgress<F> {
    f: F,
}

impl<F> FnProgress<F>
where
    F: Fn(Progress) + Send + Sync,
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ProgressSink for FnProgress<F>
where
    F: Fn(Progress) + Send + Sync,
{
    fn on_progress(&self, progress: Progress) {
        (self.f)(progress);
    }
}

/// Event delivered by [`ChannelProgress`].
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A job finished.
    Progress(Progress),
    /// The batch finished.
    Complete(BatchReport),
}

/// Sink that posts events to a channel, for consumers on another thread
/// (UI loops, terminal progress bars).
///
/// Events are dropped once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: Sender<ProgressEvent>,
}

impl ChannelProgress {
    /// Sink posting to `tx`.
    pub fn new(tx: Sender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgress {
    fn on_progress(&self, progress: Progress) {
        let _ = self.tx.send(ProgressEvent::Progress(progress));
    }

    fn on_batch_complete(&self, report: &BatchReport) {
        let _ = self.tx.send(ProgressEvent::Complete(report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn fraction_bounds() {
        assert_eq!(Progress { completed: 0, total: 4 }.fraction(), 0.0);
        assert_eq!(Progress { completed: 2, total: 4 }.fraction(), 0.5);
        assert_eq!(Progress { completed: 4, total: 4 }.fraction(), 1.0);
        assert_eq!(Progress { completed: 0, total: 0 }.fraction(), 1.0);
        assert!(Progress { completed: 0, total: 0 }.is_complete());
        assert!(!Progress { completed: 3, total: 4 }.is_complete());
    }

    #[test]
    fn fn_sink_forwards() {
        let calls = AtomicUsize::new(0);
        let sink = FnProgress::new(|p: Progress| {
            calls.fetch_add(p.completed, Ordering::SeqCst);
        });
        sink.on_progress(Progress { completed: 2, total: 3 });
        sink.on_progress(Progress { completed: 3, total: 3 });
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn channel_sink_posts_events() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sink = ChannelProgress::new(tx);
        sink.on_progress(Progress { completed: 1, total: 1 });
        sink.on_batch_complete(&BatchReport::empty());

        assert!(matches!(
            rx.try_recv(),
            Ok(ProgressEvent::Progress(Progress { completed: 1, total: 1 }))
        ));
        assert!(matches!(rx.try_recv(), Ok(ProgressEvent::Complete(r)) if r.total == 0));
    }

    #[test]
    fn channel_sink_tolerates_dropped_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        ChannelProgress::new(tx).on_progress(Progress { completed: 1, total: 2 });
    }
}
