//! Progress checkpoints for long graph builds.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{SecondsFormat, Utc};
use log::info;

/// Counts processed words across worker threads and logs a checkpoint every
/// `interval` words. An interval of zero disables checkpoints.
#[derive(Debug)]
pub struct ProgressTracker {
    interval: usize,
    total: usize,
    processed: AtomicUsize,
}

impl ProgressTracker {
    pub fn new(interval: usize, total: usize) -> Self {
        ProgressTracker {
            interval,
            total,
            processed: AtomicUsize::new(0),
        }
    }

    /// Record one processed word. Returns the cumulative count.
    pub fn tick(&self) -> usize {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.interval > 0 && processed % self.interval == 0 {
            info!(
                "[{}] processed {processed}/{} words",
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                self.total
            );
        }
        processed
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }
}
