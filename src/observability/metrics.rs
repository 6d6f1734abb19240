use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct UnitMetrics {
    identity: String,
    items_accepted: AtomicU64,
    items_skipped: AtomicU64,
    flushes: AtomicU64,
    run_failures: AtomicU64,
    total_latency_us: AtomicU64,
    latency_samples: AtomicU64,
}

impl UnitMetrics {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            items_accepted: AtomicU64::new(0),
            items_skipped: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            run_failures: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
            latency_samples: AtomicU64::new(0),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn items_accepted(&self) -> u64 {
        self.items_accepted.load(Ordering::Relaxed)
    }

    pub fn items_skipped(&self) -> u64 {
        self.items_skipped.load(Ordering::Relaxed)
    }

    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    pub fn run_failures(&self) -> u64 {
        self.run_failures.load(Ordering::Relaxed)
    }

    /// Returns the 1-based sequence number of the accepted item.
    pub fn record_item_accepted(&self) -> u64 {
        self.items_accepted.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_item_skipped(&self) {
        self.items_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_run_failure(&self) {
        self.run_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn start_processing(&self) -> Instant {
        Instant::now()
    }

    pub fn finish_processing(&self, start: Instant) {
        let latency_us = start.elapsed().as_micros() as u64;
        self.total_latency_us.fetch_add(latency_us, Ordering::Relaxed);
        self.latency_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn avg_latency_us(&self) -> u64 {
        let samples = self.latency_samples.load(Ordering::Relaxed);
        if samples == 0 {
            return 0;
        }
        self.total_latency_us.load(Ordering::Relaxed) / samples
    }
}

impl std::fmt::Debug for UnitMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitMetrics")
            .field("identity", &self.identity)
            .field("items_accepted", &self.items_accepted())
            .field("items_skipped", &self.items_skipped())
            .field("flushes", &self.flushes())
            .field("run_failures", &self.run_failures())
            .finish()
    }
}
