//! Fixed-cadence driver for the collection pipeline.
//!
//! Responsibilities:
//! - Run one cycle immediately on start, then one per interval.
//! - Own the previous-cycle quote and thread it from one cycle into the next.
//!
//! Cycles never overlap: the loop awaits each cycle before waiting for the
//! next tick. Ticks missed while a cycle was running are skipped, not replayed.

use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::pipeline::{CycleReport, Pipeline};
use crate::quotes::Quote;

pub struct Scheduler {
    pipeline: Pipeline,
    every: Duration,
    /// Last successfully fetched quote; empty until the first fetch succeeds.
    previous: Quote,
}

impl Scheduler {
    pub fn new(pipeline: Pipeline, every: Duration) -> Self {
        Self {
            pipeline,
            every,
            previous: Quote::default(),
        }
    }

    pub fn previous(&self) -> &Quote {
        &self.previous
    }

    /// Runs exactly one cycle and keeps the quote it hands back.
    pub async fn tick(&mut self) -> CycleReport {
        let previous = std::mem::take(&mut self.previous);
        let (next, report) = self.pipeline.run_cycle(previous).await;
        self.previous = next;
        report
    }

    /// Runs forever. The first interval tick completes immediately, which
    /// gives the startup cycle.
    pub async fn run(mut self) {
        let mut ticker = interval(self.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            every_secs = self.every.as_secs(),
            assets = self.pipeline.assets().len(),
            "scheduler started"
        );

        loop {
            ticker.tick().await;

            let report = self.tick().await;
            let counters = self.pipeline.counters().snapshot();

            info!(
                trace_id = %report.trace_id.as_str(),
                complete = report.is_complete(),
                cycles = counters.cycles,
                fetch_failures = counters.fetch_failures,
                persist_failures = counters.persist_failures,
                delivery_failures = counters.delivery_failures,
                "cycle finished"
            );
        }
    }
}
