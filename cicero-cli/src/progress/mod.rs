//! Per-file progress on stderr

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};

const BAR_TEMPLATE: &str = "{prefix} [{bar:30}] {pos}/{len} {wide_msg}";

/// Progress over a batch of input files
///
/// Shared by reference across worker threads. Counts what each file yielded
/// (speeches or sentences) and how many files failed.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    unit: &'static str,
    yielded: AtomicUsize,
    failed: AtomicUsize,
}

impl ProgressReporter {
    /// Reporter for `total_files` files yielding `unit`s; hidden when `quiet`
    pub fn new(total_files: usize, unit: &'static str, quiet: bool) -> Self {
        let bar = (!quiet).then(|| {
            let bar = ProgressBar::new(total_files as u64).with_prefix(unit);
            match ProgressStyle::with_template(BAR_TEMPLATE) {
                Ok(style) => bar.set_style(style.progress_chars("=> ")),
                Err(e) => log::debug!("keeping default progress style: {e}"),
            }
            bar
        });

        Self {
            bar,
            unit,
            yielded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Record one finished file; `None` marks a failure
    pub fn file_finished(&self, source: &str, yielded: Option<usize>) {
        match yielded {
            Some(count) => {
                self.yielded.fetch_add(count, Ordering::Relaxed);
            }
            None => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        if let Some(bar) = &self.bar {
            match yielded {
                Some(count) => bar.set_message(format!("{source}: {count} {}", self.unit)),
                None => bar.set_message(format!("{source}: failed")),
            }
            bar.inc(1);
        }
    }

    /// Close the bar with a summary line
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(self.summary());
        }
    }

    /// Totals so far, e.g. `12 speeches, 1 failed`
    pub fn summary(&self) -> String {
        let yielded = self.yielded.load(Ordering::Relaxed);
        match self.failed.load(Ordering::Relaxed) {
            0 => format!("{yielded} {}", self.unit),
            failed => format!("{yielded} {}, {failed} failed", self.unit),
        }
    }

    /// Files recorded so far, if a bar is shown
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }
}
