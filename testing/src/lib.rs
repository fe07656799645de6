//! # Storefront Testing
//!
//! Testing utilities and helpers for the storefront state architecture.
//!
//! This crate provides:
//! - Deterministic clocks for the `Clock` environment trait
//! - A recording middleware for asserting on dispatched actions
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use storefront_runtime::Store;
//! use storefront_testing::RecordingMiddleware;
//!
//! // any reducer whose actions are `Clone`; see `ReducerTest` for a full one
//! let recorder = RecordingMiddleware::new();
//! let mut store = Store::new(CounterState::default(), CounterReducer, ())
//!     .with_middleware(recorder.clone());
//!
//! store.dispatch(CounterAction::Increment);
//!
//! assert_eq!(store.state().count, 1);
//! assert_eq!(recorder.actions(), vec![CounterAction::Increment]);
//! ```

use chrono::{DateTime, Utc};
use storefront_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex, PoisonError};
    use storefront_runtime::Middleware;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use storefront_testing::mocks::FixedClock;
    /// use storefront_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(epoch())
    }

    /// 2025-01-01 00:00:00 UTC
    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default()
    }

    /// Clock that only moves when told to
    ///
    /// Useful for ordering tests (recently viewed, `added_at`) where each
    /// step needs a distinct timestamp.
    ///
    /// # Example
    ///
    /// ```
    /// use storefront_testing::mocks::ManualClock;
    /// use storefront_core::environment::Clock;
    /// use chrono::Duration;
    ///
    /// let clock = ManualClock::default();
    /// let before = clock.now();
    /// clock.advance(Duration::seconds(5));
    /// assert_eq!(clock.now() - before, Duration::seconds(5));
    /// ```
    #[derive(Debug)]
    pub struct ManualClock {
        time: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        /// Create a clock starting at `time`
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Mutex::new(time),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }

        /// Jump to an absolute time
        pub fn set(&self, to: DateTime<Utc>) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) = to;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new(epoch())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Middleware that records every action it sees
    ///
    /// Clones share the same log, so keep one clone and hand the other to
    /// the store.
    #[derive(Debug)]
    pub struct RecordingMiddleware<A> {
        actions: Arc<Mutex<Vec<A>>>,
    }

    impl<A> RecordingMiddleware<A> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self {
                actions: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Number of recorded actions
        #[must_use]
        pub fn len(&self) -> usize {
            self.actions.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        /// Returns true if nothing was recorded
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Forget everything recorded so far
        pub fn clear(&self) {
            self.actions.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    impl<A: Clone> RecordingMiddleware<A> {
        /// Recorded actions in dispatch order
        #[must_use]
        pub fn actions(&self) -> Vec<A> {
            self.actions.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    impl<A> Clone for RecordingMiddleware<A> {
        fn clone(&self) -> Self {
            Self {
                actions: Arc::clone(&self.actions),
            }
        }
    }

    impl<A> Default for RecordingMiddleware<A> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<A: Clone> Middleware<A> for RecordingMiddleware<A> {
        fn on_dispatch(&self, action: &A) {
            self.actions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(action.clone());
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ManualClock, RecordingMiddleware, test_clock};
