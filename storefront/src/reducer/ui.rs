//! UI slice: view mode, sort key, filters and loading flags.

use super::StorefrontEnvironment;
use crate::actions::StorefrontAction;
use crate::state::UiState;
use crate::types::FilterState;
use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for [`UiState`]
#[derive(Clone, Debug, Default)]
pub struct UiReducer;

impl UiReducer {
    /// Creates a new `UiReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for UiReducer {
    type State = UiState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::SetViewMode { mode } => state.view_mode = mode,

            StorefrontAction::SetSortBy { sort_by } => state.sort_by = sort_by,

            StorefrontAction::UpdateFilters { update } => {
                update.apply_to(&mut state.filters);
                tracing::debug!(filters = ?state.filters, "Filters updated");
            },

            StorefrontAction::ResetFilters => {
                state.filters = FilterState::with_price_range(env.config.default_price_range);
            },

            StorefrontAction::SetLoading { key, loading } => {
                if loading {
                    state.loading.insert(key);
                } else {
                    state.loading.remove(&key);
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
            | StorefrontAction::AddToWishlist { .. }
            | StorefrontAction::RemoveFromWishlist { .. }
            | StorefrontAction::AddRecentlyViewed { .. }
            | StorefrontAction::ReserveItem { .. }
            | StorefrontAction::ReleaseItem { .. }
            | StorefrontAction::AdjustReservation { .. }
            | StorefrontAction::ToggleWishlist { .. } => {},
        }

        SmallVec::new()
    }
}
