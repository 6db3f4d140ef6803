use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility.
#[derive(Clone, Default)]
pub struct Counters {
    pub cycles: Arc<AtomicU64>,
    pub fetch_failures: Arc<AtomicU64>,
    pub persist_failures: Arc<AtomicU64>,
    pub rows_written: Arc<AtomicU64>,

    // per channel attempt
    pub deliveries_sent: Arc<AtomicU64>,
    pub delivery_failures: Arc<AtomicU64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub cycles: u64,
    pub fetch_failures: u64,
    pub persist_failures: u64,
    pub rows_written: u64,
    pub deliveries_sent: u64,
    pub delivery_failures: u64,
}

impl Counters {
    pub fn incr(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
            rows_written: self.rows_written.load(Ordering::Relaxed),
            deliveries_sent: self.deliveries_sent.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
        }
    }
}
