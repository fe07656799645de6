//! Cart slice: cart lines and the saved-for-later list.
//!
//! Invariants kept by every transition:
//! - at most one cart line per product, each with a quantity above zero
//! - a product is in the cart list or the saved list, never both
//!
//! Transitions that find nothing to do leave the slice untouched, including
//! `last_modified`.

use super::StorefrontEnvironment;
use crate::actions::StorefrontAction;
use crate::state::CartState;
use crate::types::CartLineItem;
use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for [`CartState`]
#[derive(Clone, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per cart action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::AddToCart { product, quantity } => {
                if quantity == 0 {
                    tracing::debug!(id = %product.id, "Zero quantity add ignored");
                    return SmallVec::new();
                }

                let now = env.clock.now();
                if let Some(line) = state
                    .position(&product.id)
                    .and_then(|index| state.items.get_mut(index))
                {
                    line.quantity = line.quantity.saturating_add(quantity);
                } else if let Some(index) = state.saved_position(&product.id) {
                    // back from the saved list, merged with the new units
                    let mut line = state.saved_for_later.remove(index);
                    line.saved_for_later = false;
                    line.quantity = line.quantity.saturating_add(quantity);
                    state.items.push_back(line);
                } else {
                    state.items.push_back(CartLineItem::new(product, quantity, now));
                }
                state.last_modified = now;
            },

            StorefrontAction::UpdateQuantity { id, quantity } => {
                let Some(index) = state.position(&id) else {
                    tracing::debug!(%id, "Quantity update for product not in cart ignored");
                    return SmallVec::new();
                };

                if quantity <= 0 {
                    state.items.remove(index);
                } else if let Some(line) = state.items.get_mut(index) {
                    line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
                state.last_modified = env.clock.now();
            },

            StorefrontAction::RemoveFromCart { id } => {
                if let Some(index) = state.position(&id) {
                    state.items.remove(index);
                    state.last_modified = env.clock.now();
                }
            },

            StorefrontAction::SaveForLater { id } => {
                if let Some(index) = state.position(&id) {
                    let mut line = state.items.remove(index);
                    line.saved_for_later = true;
                    state.saved_for_later.push_back(line);
                    state.last_modified = env.clock.now();
                }
            },

            StorefrontAction::MoveToCart { id } => {
                if let Some(index) = state.saved_position(&id) {
                    let mut line = state.saved_for_later.remove(index);
                    line.saved_for_later = false;
                    state.items.push_back(line);
                    state.last_modified = env.clock.now();
                }
            },

            StorefrontAction::ClearCart => {
                if !state.items.is_empty() {
                    state.items.clear();
                    state.last_modified = env.clock.now();
                }
            },

            StorefrontAction::SetProducts { .. }
            | StorefrontAction::UpdateStock { .. }
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
