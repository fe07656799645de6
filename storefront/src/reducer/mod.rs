//! Reducers for the storefront state tree.
//!
//! Each slice of [`StorefrontState`] has its own reducer, scoped onto the
//! root state with [`scope_reducer`]. The inventory flows need the whole
//! tree (catalog, cart and wishlist at once) and run unscoped, last.
//!
//! Slice reducers only ever mutate their own slice and never return
//! effects; the inventory reducer never mutates anything except the
//! rejection record and answers with effects that feed primitive actions
//! back through the store.

use crate::actions::StorefrontAction;
use crate::config::StorefrontConfig;
use crate::state::{CartState, CatalogState, StorefrontState, UiState, UserState, WishlistState};
use std::sync::Arc;
use storefront_core::{
    composition::{CombinedReducer, combine_reducers, scope_reducer},
    effect::Effect,
    environment::Clock,
    reducer::Reducer,
    SmallVec,
};

mod cart;
mod catalog;
mod history;
mod inventory;
mod ui;
mod wishlist;

pub use cart::CartReducer;
pub use catalog::CatalogReducer;
pub use history::HistoryReducer;
pub use inventory::InventoryReducer;
pub use ui::UiReducer;
pub use wishlist::WishlistReducer;

/// Environment dependencies for the storefront reducers
#[derive(Clone)]
pub struct StorefrontEnvironment {
    /// Clock for generating timestamps
    pub clock: Arc<dyn Clock>,
    /// Domain settings
    pub config: Arc<StorefrontConfig>,
}

impl StorefrontEnvironment {
    /// Creates a new `StorefrontEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, config: StorefrontConfig) -> Self {
        Self {
            clock,
            config: Arc::new(config),
        }
    }

    /// Creates an environment with default settings
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, StorefrontConfig::default())
    }
}

impl std::fmt::Debug for StorefrontEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontEnvironment")
            .field("now", &self.clock.now())
            .field("config", &self.config)
            .finish()
    }
}

/// Root reducer for [`StorefrontState`]
pub struct StorefrontReducer {
    inner: CombinedReducer<StorefrontState, StorefrontAction, StorefrontEnvironment>,
}

impl StorefrontReducer {
    /// Creates the root reducer
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: combine_reducers(vec![
                Box::new(scope_reducer(CatalogReducer::new(), catalog_slice)),
                Box::new(scope_reducer(CartReducer::new(), cart_slice)),
                Box::new(scope_reducer(WishlistReducer::new(), wishlist_slice)),
                Box::new(scope_reducer(UiReducer::new(), ui_slice)),
                Box::new(scope_reducer(HistoryReducer::new(), user_slice)),
                Box::new(InventoryReducer::new()),
            ]),
        }
    }
}

impl Default for StorefrontReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StorefrontReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontReducer")
            .field("reducers", &self.inner.len())
            .finish()
    }
}

impl Reducer for StorefrontReducer {
    type State = StorefrontState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}

fn catalog_slice(state: &mut StorefrontState) -> &mut CatalogState {
    &mut state.catalog
}

fn cart_slice(state: &mut StorefrontState) -> &mut CartState {
    &mut state.cart
}

fn wishlist_slice(state: &mut StorefrontState) -> &mut WishlistState {
    &mut state.wishlist
}

fn ui_slice(state: &mut StorefrontState) -> &mut UiState {
    &mut state.ui
}

fn user_slice(state: &mut StorefrontState) -> &mut UserState {
    &mut state.user
}
