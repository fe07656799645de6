//! # Storefront Core
//!
//! Core traits and types for the storefront state architecture.
//!
//! Everything the storefront knows lives in one state tree that only changes
//! through a reducer. This crate holds the vocabulary shared by the runtime,
//! the testing helpers and the domain crate.
//!
//! ## Core Concepts
//!
//! - **State**: The state tree (catalog, cart, wishlist, UI, history)
//! - **Action**: A closed enum of every transition the store accepts
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work described as values, executed by the store
//! - **Environment**: Injected dependencies (clock, configuration)
//!
//! ## Example
//!
//! ```
//! use storefront_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct BadgeState {
//!     cart_count: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum BadgeAction {
//!     ItemAdded(u32),
//!     CartCleared,
//! }
//!
//! struct BadgeReducer;
//!
//! impl Reducer for BadgeReducer {
//!     type State = BadgeState;
//!     type Action = BadgeAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut BadgeState,
//!         action: BadgeAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<BadgeAction>; 4]> {
//!         match action {
//!             BadgeAction::ItemAdded(n) => state.cart_count += n,
//!             BadgeAction::CartCleared => state.cart_count = 0,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = BadgeState::default();
//! let _ = BadgeReducer.reduce(&mut state, BadgeAction::ItemAdded(2), &());
//! assert_eq!(state.cart_count, 2);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer composition utilities
pub mod composition;

/// Action module - the contract every action enum fulfils
///
/// Actions are closed enums matched exhaustively by reducers. The only thing
/// the runtime needs to know about them beyond that is a stable, string-typed
/// name for logging, metrics and middleware filtering.
pub mod action {
    /// Common behaviour of action enums
    ///
    /// Usually derived with `#[derive(Action)]` from `storefront-macros`, which
    /// names each variant in SCREAMING_SNAKE_CASE (`AddToCart` becomes
    /// `"ADD_TO_CART"`).
    pub trait Action {
        /// The string type of this action, e.g. `"ADD_TO_CART"`
        fn action_type(&self) -> &'static str;

        /// Every action type this enum can produce, in declaration order
        fn action_types() -> &'static [&'static str]
        where
            Self: Sized;
    }
}

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Reducers must be total: every well-formed action produces a state,
    /// never a panic. Operations on absent entities are no-ops.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effect descriptions to be executed by the store once the new state
        /// is visible to subscribers
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe follow-up work to be performed by the store. They are
/// values (not execution), so reducers stay pure and tests can inspect them.
pub mod effect {
    /// Effect type - describes work to be executed after a transition
    ///
    /// The store executes effects synchronously and in order. `Parallel` and
    /// `Sequential` only differ in intent; a single-threaded store runs both
    /// front to back.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Effects with no ordering requirement between them
        Parallel(Vec<Effect<Action>>),

        /// Effects that must run in the given order
        Sequential(Vec<Effect<Action>>),

        /// Feed an action back into the store
        ///
        /// The action goes through the full dispatch path (middleware,
        /// reducer, subscribers) after the current action completes.
        Send(Box<Action>),
    }

    impl<Action> Effect<Action> {
        /// Feed an action back into the store
        #[must_use]
        pub fn send(action: Action) -> Self {
            Effect::Send(Box::new(action))
        }

        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns true if this effect (recursively) does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    effects.iter().all(Effect::is_none)
                },
                Effect::Send(_) => false,
            }
        }

        /// Flattens the effect tree into the actions it feeds back, in
        /// execution order
        #[must_use]
        pub fn into_actions(self) -> Vec<Action> {
            let mut actions = Vec::new();
            self.collect_actions(&mut actions);
            actions
        }

        fn collect_actions(self, out: &mut Vec<Action>) {
            match self {
                Effect::None => {},
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for effect in effects {
                        effect.collect_actions(out);
                    }
                },
                Effect::Send(action) => out.push(*action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// Reducers never call `Utc::now()` directly; every timestamp in the state
    /// tree (`added_at`, `last_modified`, ...) comes from the injected clock.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
