//! Prometheus metrics for observability and monitoring.
//!
//! The store records through the `metrics` facade, so nothing is collected
//! until a recorder is installed. [`MetricsRecorder`] installs the Prometheus
//! recorder and renders the text exposition format.
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut recorder = MetricsRecorder::new();
//! recorder.install()?;
//!
//! // ... dispatch actions ...
//!
//! if let Some(text) = recorder.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other crates
pub use metrics::{counter, gauge, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus metrics recorder.
#[derive(Default)]
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl MetricsRecorder {
    /// Create a recorder that is not installed yet
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Describe all store metrics and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// Only one global recorder can exist per process. If one is already
    /// installed (common in tests) this logs a warning and succeeds without
    /// a handle, so [`MetricsRecorder::render`] returns `None`.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                register_metrics();
                self.handle = Some(handle);
                tracing::info!("Prometheus metrics recorder installed");
                Ok(())
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if this recorder was not the one installed.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!(
        "store_actions_dispatched_total",
        "Total number of actions reduced by the store, labelled by action type"
    );
    describe_histogram!(
        "store_reducer_duration_seconds",
        "Time taken to reduce a single action"
    );
    describe_counter!(
        "store_feedback_actions_total",
        "Total number of actions fed back into the store by effects"
    );
    describe_counter!(
        "store_feedback_dropped_total",
        "Total number of fed back actions dropped after the feedback budget ran out"
    );
    describe_gauge!("store_subscribers", "Number of registered state listeners");
    describe_counter!(
        "analytics_events_total",
        "Total number of analytics events emitted by middleware, labelled by action type"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record one reduced action.
    pub fn record_dispatch(action_type: &'static str, duration: Duration) {
        counter!("store_actions_dispatched_total", "action_type" => action_type).increment(1);
        histogram!("store_reducer_duration_seconds").record(duration.as_secs_f64());
    }

    /// Record actions fed back during one dispatch.
    pub fn record_feedback(count: usize) {
        counter!("store_feedback_actions_total").increment(count as u64);
    }

    /// Record fed back actions dropped after the budget ran out.
    pub fn record_dropped_feedback(count: usize) {
        counter!("store_feedback_dropped_total").increment(count as u64);
    }

    /// Record the current number of listeners.
    // Precision loss is irrelevant for listener counts
    #[allow(clippy::cast_precision_loss)]
    pub fn record_subscribers(count: usize) {
        gauge!("store_subscribers").set(count as f64);
    }
}

/// Analytics metrics recorder.
pub struct AnalyticsMetrics;

impl AnalyticsMetrics {
    /// Record one analytics event.
    pub fn record_event(action_type: &'static str) {
        counter!("analytics_events_total", "action_type" => action_type).increment(1);
    }
}
