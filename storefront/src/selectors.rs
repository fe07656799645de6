//! Derived views over the state tree.

use crate::config::StorefrontConfig;
use crate::state::StorefrontState;
use crate::types::{Product, ProductId};
use serde::Serialize;

/// Totals shown with the cart
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CartSummary {
    /// Sum of quantities
    pub item_count: u64,
    /// Sum of price times quantity
    pub subtotal: f64,
    /// Shipping fee, zero above the free shipping threshold
    pub shipping: f64,
    /// Subtotal plus shipping
    pub total: f64,
}

/// Totals for the cart list; saved lines are not counted
#[must_use]
pub fn cart_summary(state: &StorefrontState, config: &StorefrontConfig) -> CartSummary {
    let subtotal: f64 = state.cart.items.iter().map(|line| line.line_total()).sum();
    let shipping = if subtotal > config.free_shipping_threshold {
        0.0
    } else {
        config.shipping_fee
    };

    CartSummary {
        item_count: state.cart.item_count(),
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

/// Whole-percent discount against the original price, 0 without one
#[must_use]
// the guard bounds the percentage to 0..=100
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn discount_percent(product: &Product) -> u32 {
    match product.original_price {
        Some(original) if original > 0.0 && original > product.price => {
            ((original - product.price) / original * 100.0).round() as u32
        },
        _ => 0,
    }
}

/// Recently viewed products still in the catalog, newest first, at most
/// `config.recent_display_limit`
#[must_use]
pub fn recent_products<'a>(state: &'a StorefrontState, config: &StorefrontConfig) -> Vec<&'a Product> {
    state
        .user
        .recently_viewed_ids()
        .filter_map(|id| state.catalog.get(id))
        .take(config.recent_display_limit)
        .collect()
}

/// Whether `id` has a cart line
#[must_use]
pub fn is_in_cart(state: &StorefrontState, id: &ProductId) -> bool {
    state.cart.line(id).is_some()
}

/// Whether `id` is saved for later
#[must_use]
pub fn is_saved_for_later(state: &StorefrontState, id: &ProductId) -> bool {
    state.cart.saved_line(id).is_some()
}

/// Whether `id` is on the wishlist
#[must_use]
pub fn is_wishlisted(state: &StorefrontState, id: &ProductId) -> bool {
    state.wishlist.contains(id)
}
