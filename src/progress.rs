//! Terminal progress bars.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use mongo_cmp_collector::{ProgressSink, ProgressTracker};

const TEMPLATE: &str = "{msg:<40} [{bar:50.cyan/blue}] {pos}/{len} ({percent}%)";

/// One bar per (endpoint, database), drawn together on stderr.
///
/// `MultiProgress` serializes redraws, so both collectors can report into
/// the same instance concurrently.
pub struct TerminalProgress {
    multi: MultiProgress,
    style: ProgressStyle,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Bars that track state but never draw.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        Self {
            multi: MultiProgress::with_draw_target(target),
            style,
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressTracker> {
        let bar = self.multi.add(ProgressBar::new(total));
        bar.set_style(self.style.clone());
        bar.set_message(label.to_string());
        Box::new(BarTracker(bar))
    }
}

struct BarTracker(ProgressBar);

impl ProgressTracker for BarTracker {
    fn increment(&self) {
        self.0.inc(1);
    }

    fn finish(&self) {
        self.0.finish();
    }
}
