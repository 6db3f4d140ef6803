//! One collection cycle: fetch → persist → render → notify.
//!
//! Failure policy:
//! - A failed fetch or persist ends the cycle; nothing is sent.
//! - A failed channel is logged and counted; the remaining channels still run.
//!
//! The previous-cycle quote is passed in and the next one handed back, so the
//! caller owns the cache and the pipeline itself holds no mutable state.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{Instrument, debug, error, info, warn};

use crate::assets::AssetSet;
use crate::error::CycleError;
use crate::format::render;
use crate::logger::{TraceId, annotate_rows, cycle_span, timed_step};
use crate::metrics::counters::Counters;
use crate::notify::{Delivery, Notifier, NotifyError};
use crate::quotes::{Quote, QuoteSource};
use crate::store::ObservationStore;

/// Fetch and persist budget used unless overridden by configuration.
pub const DEFAULT_STEP_BUDGET: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct ChannelReport {
    pub channel: &'static str,
    pub result: Result<Delivery, NotifyError>,
}

/// What happened during one cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub trace_id: TraceId,
    /// Rows persisted, or the step that aborted the cycle.
    pub outcome: Result<usize, CycleError>,
    /// Rendered notification text; `None` when the cycle aborted before rendering.
    pub message: Option<String>,
    pub channels: Vec<ChannelReport>,
}

impl CycleReport {
    pub fn is_complete(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelReport> {
        self.channels.iter().find(|c| c.channel == name)
    }
}

pub struct Pipeline {
    assets: AssetSet,
    source: Arc<dyn QuoteSource>,
    store: Arc<dyn ObservationStore>,
    notifiers: Vec<Arc<dyn Notifier>>,
    counters: Counters,
    step_budget: Duration,
}

impl Pipeline {
    pub fn new(
        assets: AssetSet,
        source: Arc<dyn QuoteSource>,
        store: Arc<dyn ObservationStore>,
        notifiers: Vec<Arc<dyn Notifier>>,
        counters: Counters,
    ) -> Self {
        Self {
            assets,
            source,
            store,
            notifiers,
            counters,
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }

    /// Sets how long fetch or persist may take before a warning is logged.
    pub fn with_step_budget(mut self, budget: Duration) -> Self {
        self.step_budget = budget;
        self
    }

    pub fn assets(&self) -> &AssetSet {
        &self.assets
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Runs one cycle and returns the quote to use as `previous` next time.
    ///
    /// The returned quote is the freshly fetched one whenever the fetch
    /// succeeded, even if persisting or notifying failed afterwards. A failed
    /// fetch hands `previous` back unchanged.
    pub async fn run_cycle(&self, previous: Quote) -> (Quote, CycleReport) {
        let trace_id = TraceId::default();
        let span = cycle_span(&trace_id, self.assets.len());

        self.cycle(trace_id, previous).instrument(span).await
    }

    async fn cycle(&self, trace_id: TraceId, previous: Quote) -> (Quote, CycleReport) {
        Counters::incr(&self.counters.cycles, 1);

        let mut report = CycleReport {
            trace_id,
            outcome: Ok(0),
            message: None,
            channels: Vec::with_capacity(self.notifiers.len()),
        };

        let fetch = self.source.fetch(&self.assets);
        let current = match timed_step("fetch", self.step_budget, fetch).await {
            Ok(quote) => quote,
            Err(e) => {
                error!(error = %e, "fetch error");
                Counters::incr(&self.counters.fetch_failures, 1);
                report.outcome = Err(e.into());
                return (previous, report);
            }
        };

        let persist = self.store.append(&current);
        let rows = match timed_step("persist", self.step_budget, persist).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "save error");
                Counters::incr(&self.counters.persist_failures, 1);
                report.outcome = Err(e.into());
                return (current, report);
            }
        };
        annotate_rows(rows);
        Counters::incr(&self.counters.rows_written, rows as u64);
        report.outcome = Ok(rows);

        let text = render(&self.assets, &current, &previous, Local::now().naive_local());

        for notifier in &self.notifiers {
            let channel = notifier.channel();
            let result = notifier.deliver(&text).await;

            match &result {
                Ok(Delivery::Sent) => {
                    Counters::incr(&self.counters.deliveries_sent, 1);
                    debug!(channel, "notification delivered");
                }
                Ok(Delivery::Skipped) => debug!(channel, "channel disabled"),
                Err(e) => {
                    Counters::incr(&self.counters.delivery_failures, 1);
                    warn!(channel, error = %e, "notification failed");
                }
            }

            report.channels.push(ChannelReport { channel, result });
        }

        report.message = Some(text);

        info!(rows, "prices pushed");
        (current, report)
    }
}
