// src/runner.rs
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

use crate::{
    config::options::{MirrorOptions, OverlapPolicy},
    core::net,
    error::SetupError,
    progress::{CycleObserver, CycleReport, LogObserver},
    scrape::{Extraction, Extractor},
    sheets::{CredentialStore, HttpSheets, Publisher, SheetsApi},
};

/// One unit of scheduled work. Runs to completion; the scheduler never
/// starts another while one is in flight.
pub trait Cycle: Send {
    fn run_cycle(&mut self, index: u64) -> impl Future<Output = CycleReport> + Send;
}

/// Scrape the page, then overwrite the sheet with what was scraped.
/// A failed scrape skips the write, so an outage never blanks the mirror.
pub struct MirrorCycle<A> {
    extractor: Extractor,
    publisher: Publisher<A>,
}

impl<A: SheetsApi> MirrorCycle<A> {
    pub fn new(extractor: Extractor, publisher: Publisher<A>) -> Self {
        Self { extractor, publisher }
    }

    pub fn publisher(&self) -> &Publisher<A> { &self.publisher }
    pub fn publisher_mut(&mut self) -> &mut Publisher<A> { &mut self.publisher }
}

impl<A: SheetsApi> Cycle for MirrorCycle<A> {
    async fn run_cycle(&mut self, index: u64) -> CycleReport {
        let Extraction { batch, failure } = self.extractor.extract().await;
        let outcome = if failure.is_some() {
            None
        } else {
            Some(self.publisher.publish(&batch).await)
        };
        CycleReport { index, records: batch.len(), extract_failure: failure, outcome }
    }
}

/// Fixed-interval driver. Tick `k` falls at `start + k * interval`; the
/// first one fires immediately.
pub struct Scheduler<C, O = LogObserver> {
    cycle: C,
    observer: O,
    interval: Duration,
    policy: OverlapPolicy,
    cycles_run: u64,
}

impl<C: Cycle> Scheduler<C, LogObserver> {
    pub fn new(cycle: C, interval: Duration, policy: OverlapPolicy) -> Self {
        Self { cycle, observer: LogObserver, interval, policy, cycles_run: 0 }
    }
}

impl<C: Cycle, O: CycleObserver> Scheduler<C, O> {
    pub fn with_observer<P: CycleObserver>(self, observer: P) -> Scheduler<C, P> {
        Scheduler {
            cycle: self.cycle,
            observer,
            interval: self.interval,
            policy: self.policy,
            cycles_run: self.cycles_run,
        }
    }

    pub fn cycle(&self) -> &C { &self.cycle }
    pub fn cycle_mut(&mut self) -> &mut C { &mut self.cycle }
    pub fn observer(&self) -> &O { &self.observer }
    pub fn cycles_run(&self) -> u64 { self.cycles_run }

    /// Tick forever. Failed cycles are reported to the observer and otherwise ignored.
    pub async fn run(&mut self) {
        self.drive(None).await
    }

    /// Run exactly `n` cycles on the schedule, then return.
    pub async fn run_cycles(&mut self, n: u64) {
        self.drive(Some(n)).await
    }

    async fn drive(&mut self, limit: Option<u64>) {
        logf!("Ticking every {:?} ({:?} on overrun)", self.interval, self.policy);

        let mut next = Instant::now();
        let mut done = 0u64;

        while limit.is_none_or(|n| done < n) {
            sleep_until(next).await;

            let index = self.cycles_run;
            self.cycles_run += 1;
            self.observer.cycle_started(index);
            let report = self.cycle.run_cycle(index).await;
            self.observer.cycle_finished(&report);
            done += 1;

            next += self.interval;
            if self.policy == OverlapPolicy::Skip {
                let skipped = ticks_behind(next, Instant::now(), self.interval);
                if skipped > 0 {
                    self.observer.ticks_skipped(skipped);
                    next += self.interval * skipped as u32;
                }
            }
        }
    }
}

/// Ticks in `[next, now)`: the ones that fired while the last cycle ran.
fn ticks_behind(next: Instant, now: Instant, interval: Duration) -> u64 {
    if now <= next || interval.is_zero() {
        return 0;
    }
    let behind = (now - next).as_nanos();
    let period = interval.as_nanos();
    behind.div_ceil(period) as u64
}

/// Wire the production mirror from options: one pooled client shared by the
/// scraper and the sheets API, credentials read lazily from disk.
pub fn mirror(opts: &MirrorOptions) -> Result<Scheduler<MirrorCycle<HttpSheets>>, SetupError> {
    let client = net::build_client(&opts.transport)?;
    let extractor = Extractor::with_client(opts.source_url.as_str(), client.clone());
    let api = HttpSheets::new(client, &opts.sheets_endpoint)?;
    let publisher = Publisher::new(api, opts.target.clone(), CredentialStore::new(&opts.credentials_path));

    Ok(Scheduler::new(MirrorCycle::new(extractor, publisher), opts.interval, opts.overlap))
}
