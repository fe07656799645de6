//! Catalog slice: product list and stock levels.

use super::StorefrontEnvironment;
use crate::actions::StorefrontAction;
use crate::state::CatalogState;
use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for [`CatalogState`]
#[derive(Clone, Debug, Default)]
pub struct CatalogReducer;

impl CatalogReducer {
    /// Creates a new `CatalogReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::SetProducts { products } => {
                state.replace(products, env.clock.now());
                tracing::debug!(products = state.len(), "Catalog replaced");
            },

            StorefrontAction::UpdateStock { id, stock } => {
                if let Some(product) = state.items.get_mut(&id) {
                    product.stock = stock;
                } else {
                    tracing::debug!(%id, "Stock update for unknown product ignored");
                }
            },

            StorefrontAction::AddToCart { .. }
            | StorefrontAction::UpdateQuantity { .. }
            | StorefrontAction::RemoveFromCart { .. }
            | StorefrontAction::SaveForLater { .. }
            | StorefrontAction::MoveToCart { .. }
            | StorefrontAction::ClearCart
            | StorefrontAction::AddToWishlist { .. }
            | StorefrontAction::RemoveFromWishlist { .. }
            | StorefrontAction::SetViewMode { .. }
            | StorefrontAction::SetSortBy { .. }
            | StorefrontAction::UpdateFilters { .. }
            | StorefrontAction::ResetFilters
            | StorefrontAction::SetLoading { .. }
            | StorefrontAction::AddRecentlyViewed { .. }
            | StorefrontAction::ReserveItem { .. }
            | StorefrontAction::ReleaseItem { .. }
            | StorefrontAction::AdjustReservation { .. }
            | StorefrontAction::ToggleWishlist { .. } => {},
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_products;
    use crate::reducer::test_support::{seed, test_env};
    use crate::types::ProductId;
    use chrono::Duration;
    use storefront_core::environment::Clock;
    use storefront_testing::{ReducerTest, assertions, test_clock};

    fn seeded() -> CatalogState {
        CatalogState::new(seed_products(), test_clock().now() - Duration::days(1))
    }

    #[test]
    fn test_set_products_replaces_catalog() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(seeded())
            .when_action(StorefrontAction::set_products(vec![seed("4"), seed("2")]))
            .then_state(|state| {
                let ids: Vec<&str> = state.products().map(|p| p.id.as_str()).collect();
                assert_eq!(ids, vec!["4", "2"]);
                assert_eq!(state.last_updated, test_clock().now());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_update_stock_sets_absolute_value() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(seeded())
            .when_action(StorefrontAction::update_stock("1", 4))
            .then_state(|state| {
                assert_eq!(state.get(&ProductId::new("1")).map(|p| p.stock), Some(4));
                assert_eq!(state.get(&ProductId::new("2")).map(|p| p.stock), Some(8));
            })
            .run();
    }

    #[test]
    fn test_update_stock_unknown_product_is_noop() {
        let before = seeded();
        let expected = before.clone();

        ReducerTest::new(CatalogReducer::new())
            .with_env(test_env())
            .given_state(before)
            .when_action(StorefrontAction::update_stock("42", 9))
            .then_state(move |state| {
                assert_eq!(state, &expected);
            })
            .run();
    }
}
