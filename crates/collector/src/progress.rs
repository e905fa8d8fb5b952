//! Progress reporting boundary.
//!
//! Both collectors report into the same sink concurrently, so sinks must
//! serialize their own updates.

/// Creates one tracker per (endpoint, database) pair.
pub trait ProgressSink: Send + Sync {
    /// Start a counter labelled `label` that will reach `total`.
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressTracker>;
}

/// A single labelled counter.
pub trait ProgressTracker: Send + Sync {
    fn increment(&self);
    fn finish(&self);
}

/// Sink that discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

struct NoTracker;

impl ProgressSink for NoProgress {
    fn start(&self, _label: &str, _total: u64) -> Box<dyn ProgressTracker> {
        Box::new(NoTracker)
    }
}

impl ProgressTracker for NoTracker {
    fn increment(&self) {}
    fn finish(&self) {}
}
