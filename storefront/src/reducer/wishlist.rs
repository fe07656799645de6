//! Wishlist slice.

use super::StorefrontEnvironment;
use crate::actions::StorefrontAction;
use crate::state::WishlistState;
use crate::types::WishlistEntry;
use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for [`WishlistState`]
#[derive(Clone, Debug, Default)]
pub struct WishlistReducer;

impl WishlistReducer {
    /// Creates a new `WishlistReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for WishlistReducer {
    type State = WishlistState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::AddToWishlist {
                product,
                priority,
                notes,
            } => {
                // first write wins; a repeated add does not touch priority or notes
                if state.contains(&product.id) {
                    tracing::debug!(id = %product.id, "Product already in wishlist");
                } else {
                    state.items.push_back(WishlistEntry {
                        product,
                        priority,
                        added_at: env.clock.now(),
                        notes,
                    });
                }
            },

            StorefrontAction::RemoveFromWishlist { id } => {
                if let Some(index) = state.items.iter().position(|entry| entry.product.id == id) {
                    state.items.remove(index);
                }
            },

            StorefrontAction::SetProducts { .. }
            | StorefrontAction::UpdateStock { .. }
            | StorefrontAction::AddToCart { .. }
            | StorefrontAction::UpdateQuantity { .. }
            | StorefrontAction::RemoveFromCart { .. }
            | StorefrontAction::SaveForLater { .. }
            | StorefrontAction::MoveToCart { .. }
            | StorefrontAction::ClearCart
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
