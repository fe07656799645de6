//! # Storefront
//!
//! Client-side state for an e-commerce storefront: the product catalog,
//! the shopping cart with its saved-for-later list, the wishlist, the
//! recently viewed history, and the display settings (filters, sort key,
//! view mode, loading flags).
//!
//! Every change is an [`StorefrontAction`] dispatched to a [`StorefrontStore`].
//! The [`StorefrontReducer`] applies it; the [`AnalyticsMiddleware`] reports
//! the cart and wishlist actions it tracks; subscribers are called once per
//! applied action.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront::{StorefrontAction, StorefrontEnvironment, StorefrontReducer, StorefrontState, StorefrontStore};
//! use storefront::selectors::cart_summary;
//! use storefront_core::environment::{Clock, SystemClock};
//!
//! let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//! let env = StorefrontEnvironment::with_clock(clock.clone());
//! let mut store: StorefrontStore =
//!     StorefrontStore::new(StorefrontState::seeded(clock.now()), StorefrontReducer::new(), env);
//!
//! store.dispatch(StorefrontAction::reserve_item("3", 2));
//!
//! let summary = cart_summary(store.state(), &store.environment().config);
//! assert_eq!(summary.item_count, 2);
//! assert_eq!(store.state().catalog.get(&"3".into()).map(|p| p.stock), Some(23));
//! ```

pub mod actions;
pub mod analytics;
pub mod catalog;
pub mod config;
pub mod query;
pub mod reducer;
pub mod selectors;
pub mod state;
pub mod types;

pub use actions::StorefrontAction;
pub use analytics::{AnalyticsEvent, AnalyticsMiddleware, AnalyticsSink, BufferedAnalyticsSink, TracingAnalyticsSink};
pub use config::{ConfigError, StorefrontConfig};
pub use reducer::{StorefrontEnvironment, StorefrontReducer};
pub use state::StorefrontState;

/// Store over the storefront state tree
pub type StorefrontStore =
    storefront_runtime::Store<StorefrontState, StorefrontAction, StorefrontEnvironment, StorefrontReducer>;
