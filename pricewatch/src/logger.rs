use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{Span, field, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

/// Correlation id attached to every log line of one cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceId(String);

impl TraceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output for local runs.
    Compact,
    /// One JSON object per event, for log shipping.
    Json,
}

impl LogFormat {
    /// `APP_ENV=production` selects JSON; anything else is compact.
    pub fn from_app_env(app_env: Option<&str>) -> Self {
        match app_env {
            Some(env) if env.eq_ignore_ascii_case("production") => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default
/// `pricewatch=info` filter.
pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pricewatch=info"));

    // cycle spans close once per poll, so their timing is worth a line
    let base = fmt::layer()
        .with_target(false)
        .with_span_events(fmt::format::FmtSpan::CLOSE);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(base.json().with_current_span(true))
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(base.compact())
            .init(),
    }
}

pub fn cycle_span(trace_id: &TraceId, assets: usize) -> Span {
    tracing::info_span!(
        "cycle",
        trace_id = %trace_id.as_str(),
        assets,
        rows = field::Empty
    )
}

/// Records the persisted row count on the current cycle span.
pub fn annotate_rows(rows: usize) {
    Span::current().record("rows", rows as u64);
}

/// Awaits one pipeline step and warns when it ran past `budget`.
///
/// The step still completes; the budget is advisory.
pub async fn timed_step<F, T>(step: &'static str, budget: Duration, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();

    if elapsed > budget {
        warn!(
            step,
            elapsed_ms = elapsed.as_millis() as u64,
            budget_ms = budget.as_millis() as u64,
            "step over budget"
        );
    }
    out
}
