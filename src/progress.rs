// src/progress.rs
use crate::error::{ExtractError, PublishError};
use crate::sheets::PublishSummary;

/// Everything one cycle did, good or bad. Failures are data here, not control flow:
/// the scheduler keeps ticking whatever the report says.
///
/// `outcome` is `None` when the scrape failed and the sheet was left as it was.
#[derive(Debug)]
pub struct CycleReport {
    pub index: u64,
    pub records: usize,
    pub extract_failure: Option<ExtractError>,
    pub outcome: Option<Result<PublishSummary, PublishError>>,
}

impl CycleReport {
    pub fn is_clean(&self) -> bool {
        self.extract_failure.is_none() && matches!(self.outcome, Some(Ok(_)))
    }
}

/// Hooks for watching the scheduler (logging, alerting, counters).
/// Every method has a no-op default.
pub trait CycleObserver: Send {
    /// Called before a cycle starts.
    fn cycle_started(&mut self, _index: u64) {}

    /// Ticks dropped because a cycle was still running when they fired.
    fn ticks_skipped(&mut self, _count: u64) {}

    /// Called after every cycle, successful or not.
    fn cycle_finished(&mut self, _report: &CycleReport) {}
}

/// A no-op observer.
pub struct NullObserver;
impl CycleObserver for NullObserver {}

/// Writes cycle outcomes to the log.
pub struct LogObserver;

impl CycleObserver for LogObserver {
    fn cycle_started(&mut self, index: u64) {
        logd!("Cycle {index} started");
    }

    fn ticks_skipped(&mut self, count: u64) {
        logw!("Previous cycle overran the interval; skipped {count} tick(s)");
    }

    fn cycle_finished(&mut self, report: &CycleReport) {
        // The extractor already logged why the scrape failed.
        match &report.outcome {
            Some(Ok(s)) => logf!("Cycle {}: published {} rows to '{}'", report.index, s.records, s.sheet_title),
            Some(Err(e)) => loge!("Cycle {}: publish failed: {e}", report.index),
            None => logw!("Cycle {}: nothing scraped; sheet left untouched", report.index),
        }
    }
}
