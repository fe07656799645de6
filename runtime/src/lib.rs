//! # Storefront Runtime
//!
//! Runtime implementation for the storefront state architecture.
//!
//! This crate provides the [`Store`] that owns the state tree, runs the
//! reducer, feeds effects back and notifies subscribers.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, reducer and environment; exposes `dispatch`,
//!   `state` and `subscribe`
//! - **Middleware**: Observers that see every action before the reducer does
//! - **Subscriptions**: Listeners called after each completed transition
//!
//! ## Example
//!
//! ```ignore
//! use storefront_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! let subscription = store.subscribe(|state| println!("cart has {} lines", state.cart.items.len()));
//! store.dispatch(Action::ClearCart);
//!
//! let lines = store.state().cart.items.len();
//! subscription.unsubscribe();
//! ```
//!
//! The store is synchronous and single-threaded: `dispatch` returns once the
//! action, everything it fed back, and every notification have completed.

use std::time::Duration;

/// Prometheus metrics for observability
pub mod metrics;

/// Middleware observing dispatched actions
pub mod middleware;

/// Listener registry and subscription handles
pub mod subscription;

pub use middleware::{LoggingMiddleware, Middleware};
pub use store::Store;
pub use subscription::{Subscription, SubscriptionId};

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use storefront_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_actions(16);
/// assert_eq!(config.max_feedback_actions, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// How many actions effects may feed back during a single `dispatch`
    ///
    /// Anything past this budget is dropped and logged; it almost always
    /// means two reducers keep answering each other.
    pub max_feedback_actions: usize,
    /// Reducer runs slower than this are logged at warn level
    pub slow_reducer_threshold: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_actions: usize, slow_reducer_threshold: Duration) -> Self {
        Self {
            max_feedback_actions,
            slow_reducer_threshold,
        }
    }

    /// Set the feedback budget
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, max: usize) -> Self {
        self.max_feedback_actions = max;
        self
    }

    /// Set the slow reducer threshold
    #[must_use]
    pub const fn with_slow_reducer_threshold(mut self, threshold: Duration) -> Self {
        self.slow_reducer_threshold = threshold;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_actions: 64,
            slow_reducer_threshold: Duration::from_millis(16),
        }
    }
}

/// Store module - the runtime coordinator for a reducer
pub mod store {
    use crate::StoreConfig;
    use crate::metrics::StoreMetrics;
    use crate::middleware::Middleware;
    use crate::subscription::{ListenerRegistry, Subscription};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Instant;
    use storefront_core::{action::Action, effect::Effect, reducer::Reducer, SmallVec};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, read through [`Store::state`])
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Middleware (observers run before the reducer)
    /// 5. Listeners (notified after every completed transition)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// A store is a plain value; create as many as you like (one per test,
    /// for instance). It is deliberately `!Send`: all work happens on the
    /// thread that owns it.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        middleware: Vec<Box<dyn Middleware<A>>>,
        listeners: Rc<RefCell<ListenerRegistry<S>>>,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Action,
        S: 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                middleware: Vec::new(),
                listeners: Rc::new(RefCell::new(ListenerRegistry::new())),
                config,
            }
        }

        /// Append a middleware to the chain (builder style)
        ///
        /// Middleware run in the order they were added.
        #[must_use]
        pub fn with_middleware(mut self, middleware: impl Middleware<A> + 'static) -> Self {
            self.add_middleware(middleware);
            self
        }

        /// Append a middleware to the chain
        pub fn add_middleware(&mut self, middleware: impl Middleware<A> + 'static) {
            self.middleware.push(Box::new(middleware));
        }

        /// Current state
        #[must_use]
        pub const fn state(&self) -> &S {
            &self.state
        }

        /// Owned copy of the current state
        #[must_use]
        pub fn snapshot(&self) -> S
        where
            S: Clone,
        {
            self.state.clone()
        }

        /// The injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// The store configuration
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Register a listener called after every completed transition
        ///
        /// The listener receives the new state. Keep the returned handle to
        /// unsubscribe later; dropping it leaves the listener registered.
        pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> Subscription<S> {
            let id = self.listeners.borrow_mut().insert(Box::new(listener));
            StoreMetrics::record_subscribers(self.subscriber_count());
            tracing::debug!(subscription = %id, "Listener subscribed");
            Subscription::new(id, Rc::downgrade(&self.listeners))
        }

        /// Number of registered listeners
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.listeners.borrow().len()
        }

        /// Dispatch an action
        ///
        /// 1. Every middleware observes the action
        /// 2. The reducer applies it
        /// 3. Every listener is notified with the new state
        /// 4. Actions fed back by effects go through steps 1-3 in order
        ///
        /// Never fails. Feedback past [`StoreConfig::max_feedback_actions`]
        /// is dropped and logged at error level.
        #[tracing::instrument(skip_all, name = "store_dispatch", fields(action_type = action.action_type()))]
        pub fn dispatch(&mut self, action: A) {
            let mut queue = VecDeque::from([action]);
            let mut fed_back = 0usize;
            let mut root = true;

            while let Some(next) = queue.pop_front() {
                if !root {
                    if fed_back >= self.config.max_feedback_actions {
                        let dropped = queue.len() + 1;
                        tracing::error!(
                            dropped,
                            limit = self.config.max_feedback_actions,
                            "Feedback budget exhausted, dropping remaining actions"
                        );
                        StoreMetrics::record_dropped_feedback(dropped);
                        break;
                    }
                    fed_back += 1;
                    tracing::trace!(action_type = next.action_type(), "Dispatching fed back action");
                }
                root = false;

                for effect in self.process(next) {
                    queue.extend(effect.into_actions());
                }
            }

            if fed_back > 0 {
                StoreMetrics::record_feedback(fed_back);
            }
        }

        /// Runs one action through middleware, reducer and listeners
        fn process(&mut self, action: A) -> SmallVec<[Effect<A>; 4]> {
            let action_type = action.action_type();

            for middleware in &self.middleware {
                middleware.on_dispatch(&action);
            }

            let start = Instant::now();
            let effects = {
                let span = tracing::debug_span!("reducer_execution", action_type);
                let _enter = span.enter();
                self.reducer.reduce(&mut self.state, action, &self.environment)
            };
            let duration = start.elapsed();
            StoreMetrics::record_dispatch(action_type, duration);

            if duration > self.config.slow_reducer_threshold {
                tracing::warn!(action_type, ?duration, "Slow reducer");
            }
            tracing::trace!(action_type, effects = effects.len(), "Reducer completed");

            ListenerRegistry::notify(&self.listeners, &self.state);

            effects
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state)
                .field("middleware", &self.middleware.len())
                .field("listeners", &self.listeners.borrow().len())
                .field("config", &self.config)
                .finish_non_exhaustive()
        }
    }
}

