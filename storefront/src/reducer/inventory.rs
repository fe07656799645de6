//! Inventory flows: cart changes paired with stock adjustments.
//!
//! These actions never mutate the catalog or the cart themselves. They
//! validate against the current state and answer with effects that feed the
//! primitive actions (`ADD_TO_CART`, `UPDATE_STOCK`, ...) back through the
//! store, so middleware and subscribers see every step.
//!
//! A rejected flow records its reason in `last_rejection`; a successful one
//! clears it.

use super::StorefrontEnvironment;
use crate::actions::StorefrontAction;
use crate::state::StorefrontState;
use crate::types::ProductId;
use storefront_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Reducer for the inventory flows, over the whole state tree
#[derive(Clone, Debug, Default)]
pub struct InventoryReducer;

impl InventoryReducer {
    /// Creates a new `InventoryReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a `RESERVE_ITEM` and plans its follow-up actions
    fn plan_reserve(
        state: &StorefrontState,
        id: &ProductId,
        quantity: u32,
    ) -> Result<Vec<StorefrontAction>, String> {
        let Some(product) = state.catalog.get(id) else {
            return Err(format!("Product {id} not found"));
        };

        if quantity == 0 {
            return Err("Quantity must be greater than zero".to_string());
        }

        if product.stock < quantity {
            return Err(format!(
                "Insufficient stock for {id}: requested {quantity}, available {}",
                product.stock
            ));
        }

        Ok(vec![
            StorefrontAction::add_to_cart(product.clone(), quantity),
            StorefrontAction::update_stock(id.clone(), product.stock - quantity),
        ])
    }

    /// Validates a `RELEASE_ITEM` and plans its follow-up actions
    fn plan_release(state: &StorefrontState, id: &ProductId) -> Result<Vec<StorefrontAction>, String> {
        let Some(line) = state.cart.line(id) else {
            return Err(format!("Product {id} is not in the cart"));
        };

        let mut actions = vec![StorefrontAction::remove_from_cart(id.clone())];
        // products dropped from the catalog have no stock to restore
        if let Some(product) = state.catalog.get(id) {
            actions.push(StorefrontAction::update_stock(
                id.clone(),
                product.stock.saturating_add(line.quantity),
            ));
        }
        Ok(actions)
    }

    /// Validates an `ADJUST_RESERVATION` and plans its follow-up actions
    fn plan_adjust(
        state: &StorefrontState,
        id: &ProductId,
        quantity: i64,
    ) -> Result<Vec<StorefrontAction>, String> {
        let Some(line) = state.cart.line(id) else {
            return Err(format!("Product {id} is not in the cart"));
        };

        if quantity <= 0 {
            return Self::plan_release(state, id);
        }

        let diff = quantity - i64::from(line.quantity);
        if diff == 0 {
            return Ok(Vec::new());
        }

        let stock = state.catalog.get(id).map(|product| i64::from(product.stock));
        if diff > 0 && stock.is_none_or(|available| available < diff) {
            return Err(format!(
                "Insufficient stock for {id}: requested {diff} more, available {}",
                stock.unwrap_or(0)
            ));
        }

        let mut actions = vec![StorefrontAction::update_quantity(id.clone(), quantity)];
        if let Some(available) = stock {
            let remaining = u32::try_from(available - diff).unwrap_or(u32::MAX);
            actions.push(StorefrontAction::update_stock(id.clone(), remaining));
        }
        Ok(actions)
    }

    /// Turns a plan into effects, recording the outcome
    fn settle(
        state: &mut StorefrontState,
        action_type: &'static str,
        id: &ProductId,
        plan: Result<Vec<StorefrontAction>, String>,
    ) -> SmallVec<[Effect<StorefrontAction>; 4]> {
        match plan {
            Ok(actions) => {
                state.last_rejection = None;
                if actions.is_empty() {
                    return SmallVec::new();
                }
                tracing::debug!(action_type, %id, steps = actions.len(), "Inventory flow accepted");
                smallvec![Effect::chain(actions.into_iter().map(Effect::send).collect())]
            },
            Err(reason) => {
                tracing::warn!(action_type, %id, %reason, "Inventory flow rejected");
                state.last_rejection = Some(reason);
                SmallVec::new()
            },
        }
    }
}

impl Reducer for InventoryReducer {
    type State = StorefrontState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::ReserveItem { id, quantity } => {
                let plan = Self::plan_reserve(state, &id, quantity);
                Self::settle(state, "RESERVE_ITEM", &id, plan)
            },

            StorefrontAction::ReleaseItem { id } => {
                let plan = Self::plan_release(state, &id);
                Self::settle(state, "RELEASE_ITEM", &id, plan)
            },

            StorefrontAction::AdjustReservation { id, quantity } => {
                let plan = Self::plan_adjust(state, &id, quantity);
                Self::settle(state, "ADJUST_RESERVATION", &id, plan)
            },

            StorefrontAction::ToggleWishlist { product } => {
                let id = product.id.clone();
                let next = if state.wishlist.contains(&id) {
                    StorefrontAction::remove_from_wishlist(id.clone())
                } else {
                    StorefrontAction::add_to_wishlist(product)
                };
                Self::settle(state, "TOGGLE_WISHLIST", &id, Ok(vec![next]))
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
            | StorefrontAction::SetViewMode { .. }
            | StorefrontAction::SetSortBy { .. }
            | StorefrontAction::UpdateFilters { .. }
            | StorefrontAction::ResetFilters
            | StorefrontAction::SetLoading { .. }
            | StorefrontAction::AddRecentlyViewed { .. } => SmallVec::new(),
        }
    }
}
