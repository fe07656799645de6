//! Reducer composition utilities
//!
//! A state tree is easier to reason about when each slice has its own reducer.
//! This module glues slice reducers back together:
//!
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//!
//! # Example
//!
//! ```
//! use storefront_core::composition::{combine_reducers, scope_reducer};
//! use storefront_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct Cart {
//!     lines: u32,
//! }
//!
//! #[derive(Clone, Default)]
//! struct Wishlist {
//!     entries: u32,
//! }
//!
//! #[derive(Clone, Default)]
//! struct Shop {
//!     cart: Cart,
//!     wishlist: Wishlist,
//! }
//!
//! #[derive(Clone)]
//! enum ShopAction {
//!     AddLine,
//!     AddEntry,
//! }
//!
//! struct CartReducer;
//! struct WishlistReducer;
//!
//! impl Reducer for CartReducer {
//!     type State = Cart;
//!     type Action = ShopAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Cart, action: ShopAction, _env: &()) -> SmallVec<[Effect<ShopAction>; 4]> {
//!         if matches!(action, ShopAction::AddLine) {
//!             state.lines += 1;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! impl Reducer for WishlistReducer {
//!     type State = Wishlist;
//!     type Action = ShopAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Wishlist, action: ShopAction, _env: &()) -> SmallVec<[Effect<ShopAction>; 4]> {
//!         if matches!(action, ShopAction::AddEntry) {
//!             state.entries += 1;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let shop = combine_reducers(vec![
//!     Box::new(scope_reducer(CartReducer, |s: &mut Shop| &mut s.cart)),
//!     Box::new(scope_reducer(WishlistReducer, |s: &mut Shop| &mut s.wishlist)),
//! ]);
//!
//! let mut state = Shop::default();
//! let _ = shop.reduce(&mut state, ShopAction::AddLine, &());
//! let _ = shop.reduce(&mut state, ShopAction::AddEntry, &());
//! assert_eq!(state.cart.lines, 1);
//! assert_eq!(state.wishlist.entries, 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer sees the action in the order given, and the state left behind
/// by the previous one. Effects are concatenated; `Effect::None` entries are
/// dropped along the way.
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E>>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E>>>,
}

impl<S, A, E> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    /// Number of reducers in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns true if the chain has no reducers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

/// Scopes a reducer to operate on one slice of a larger state.
///
/// The `lens` borrows the slice mutably out of the parent, so the child
/// reducer updates it in place and the rest of the parent stays untouched.
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    lens: fn(&mut S) -> &mut SubS,
) -> ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        lens,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a slice of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    lens: fn(&mut S) -> &mut SubS,
    _phantom: std::marker::PhantomData<fn(A, &E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.lens)(state), action, env)
    }
}
