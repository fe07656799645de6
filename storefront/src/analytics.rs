//! Analytics middleware.
//!
//! Watches every dispatched action, including the ones fed back by the
//! inventory flows, and reports those whose type starts with a tracked
//! prefix (`ADD_TO_CART`, `REMOVE_FROM_CART`, `ADD_TO_WISHLIST` by default)
//! to an [`AnalyticsSink`] before the reducer sees them.
//!
//! The middleware gets the action by shared reference and returns nothing,
//! so it can neither change nor drop it.

use crate::actions::StorefrontAction;
use crate::config::StorefrontConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use storefront_core::{action::Action, environment::Clock};
use storefront_runtime::Middleware;
use storefront_runtime::metrics::AnalyticsMetrics;

/// Log target for analytics records
pub const ANALYTICS_TARGET: &str = "storefront::analytics";

/// One analytics record
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    /// Action type, e.g. `ADD_TO_CART`
    pub action_type: &'static str,
    /// Action fields as JSON
    pub payload: serde_json::Value,
    /// When the action was dispatched
    pub timestamp: DateTime<Utc>,
}

/// Destination for analytics records
pub trait AnalyticsSink {
    /// Called once per tracked action
    fn record(&self, event: &AnalyticsEvent);
}

/// Logs records at info level under [`ANALYTICS_TARGET`] and counts them
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAnalyticsSink;

impl AnalyticsSink for TracingAnalyticsSink {
    fn record(&self, event: &AnalyticsEvent) {
        tracing::info!(
            target: ANALYTICS_TARGET,
            action_type = event.action_type,
            payload = %event.payload,
            timestamp = %event.timestamp,
            "Analytics event"
        );
        AnalyticsMetrics::record_event(event.action_type);
    }
}

/// Keeps records in memory; clones share the same buffer
#[derive(Clone, Debug, Default)]
pub struct BufferedAnalyticsSink {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl BufferedAnalyticsSink {
    /// Creates an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records so far, oldest first
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns every record
    pub fn drain(&self) -> Vec<AnalyticsEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl AnalyticsSink for BufferedAnalyticsSink {
    fn record(&self, event: &AnalyticsEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Reports tracked storefront actions to a sink
///
/// # Example
///
/// ```ignore
/// let middleware = AnalyticsMiddleware::new(&config, clock.clone());
/// let mut store = Store::new(state, StorefrontReducer::new(), env).with_middleware(middleware);
/// ```
pub struct AnalyticsMiddleware<K = TracingAnalyticsSink> {
    prefixes: Vec<String>,
    clock: Arc<dyn Clock>,
    sink: K,
}

impl AnalyticsMiddleware<TracingAnalyticsSink> {
    /// Tracks the configured prefixes and logs through `tracing`
    #[must_use]
    pub fn new(config: &StorefrontConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_sink(config, clock, TracingAnalyticsSink)
    }
}

impl<K: AnalyticsSink> AnalyticsMiddleware<K> {
    /// Tracks the configured prefixes and reports to `sink`
    #[must_use]
    pub fn with_sink(config: &StorefrontConfig, clock: Arc<dyn Clock>, sink: K) -> Self {
        Self {
            prefixes: config.analytics_prefixes.clone(),
            clock,
            sink,
        }
    }

    /// Whether actions of this type are reported
    #[must_use]
    pub fn tracks(&self, action_type: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| action_type.starts_with(prefix.as_str()))
    }

    /// The sink records go to
    pub const fn sink(&self) -> &K {
        &self.sink
    }
}

impl<K: AnalyticsSink> Middleware<StorefrontAction> for AnalyticsMiddleware<K> {
    fn on_dispatch(&self, action: &StorefrontAction) {
        let action_type = action.action_type();
        if !self.tracks(action_type) {
            return;
        }

        self.sink.record(&AnalyticsEvent {
            action_type,
            payload: action.payload(),
            timestamp: self.clock.now(),
        });
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for AnalyticsMiddleware<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsMiddleware")
            .field("prefixes", &self.prefixes)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}
