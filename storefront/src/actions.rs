//! Actions accepted by the storefront store.
//!
//! Each variant's action type is its name in SCREAMING_SNAKE_CASE
//! (`AddToCart` is `ADD_TO_CART`), which is what the analytics middleware
//! matches prefixes against. Serialized actions use the same names under a
//! `type` tag with the fields under `payload`.

use crate::types::{FilterUpdate, Product, ProductId, SortBy, ViewMode, WishlistPriority};
use serde::{Deserialize, Serialize};
use storefront_macros::Action;

/// Everything that can happen to the storefront state
#[derive(Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorefrontAction {
    // ========== Catalog ==========
    /// Replace the whole catalog
    SetProducts {
        /// New catalog, in display order
        products: Vec<Product>,
    },

    /// Set one product's stock to an absolute value
    UpdateStock {
        /// Product to update
        id: ProductId,
        /// New stock level
        stock: u32,
    },

    // ========== Cart ==========
    /// Add units of a product to the cart
    AddToCart {
        /// Product snapshot
        product: Product,
        /// Units to add
        quantity: u32,
    },

    /// Set a cart line's quantity; zero or less removes the line
    UpdateQuantity {
        /// Product on the line
        id: ProductId,
        /// New quantity
        quantity: i64,
    },

    /// Remove a cart line
    RemoveFromCart {
        /// Product on the line
        id: ProductId,
    },

    /// Park a cart line in the saved-for-later list
    SaveForLater {
        /// Product on the line
        id: ProductId,
    },

    /// Bring a saved line back into the cart
    MoveToCart {
        /// Product on the line
        id: ProductId,
    },

    /// Empty the cart; saved lines stay
    ClearCart,

    // ========== Wishlist ==========
    /// Wish for a product; ignored if already wished for
    AddToWishlist {
        /// Product snapshot
        product: Product,
        /// Priority
        priority: WishlistPriority,
        /// Free-text notes
        notes: Option<String>,
    },

    /// Drop a wishlist entry
    RemoveFromWishlist {
        /// Product on the entry
        id: ProductId,
    },

    // ========== UI ==========
    /// Switch between grid and list
    SetViewMode {
        /// New mode
        mode: ViewMode,
    },

    /// Change the sort key; `None` restores catalog order
    SetSortBy {
        /// New key
        sort_by: Option<SortBy>,
    },

    /// Merge the given fields into the filters
    UpdateFilters {
        /// Fields to replace
        update: FilterUpdate,
    },

    /// Restore the default filters
    ResetFilters,

    /// Set or clear a loading flag
    SetLoading {
        /// Flag name
        key: String,
        /// `false` removes the flag
        loading: bool,
    },

    // ========== History ==========
    /// Record a product view
    AddRecentlyViewed {
        /// Viewed product
        id: ProductId,
    },

    // ========== Inventory flows ==========
    /// Take units out of stock and into the cart
    ReserveItem {
        /// Product to reserve
        id: ProductId,
        /// Units to reserve
        quantity: u32,
    },

    /// Remove a cart line and put its units back in stock
    ReleaseItem {
        /// Product on the line
        id: ProductId,
    },

    /// Change a cart line's quantity, moving the difference out of or back
    /// into stock
    AdjustReservation {
        /// Product on the line
        id: ProductId,
        /// New quantity; zero or less releases the line
        quantity: i64,
    },

    /// Add a product to the wishlist, or remove it if already there
    ToggleWishlist {
        /// Product snapshot
        product: Product,
    },
}

impl StorefrontAction {
    /// `SET_PRODUCTS`
    #[must_use]
    pub const fn set_products(products: Vec<Product>) -> Self {
        Self::SetProducts { products }
    }

    /// `UPDATE_STOCK`
    #[must_use]
    pub fn update_stock(id: impl Into<ProductId>, stock: u32) -> Self {
        Self::UpdateStock {
            id: id.into(),
            stock,
        }
    }

    /// `ADD_TO_CART`
    #[must_use]
    pub const fn add_to_cart(product: Product, quantity: u32) -> Self {
        Self::AddToCart { product, quantity }
    }

    /// `UPDATE_QUANTITY`
    #[must_use]
    pub fn update_quantity(id: impl Into<ProductId>, quantity: i64) -> Self {
        Self::UpdateQuantity {
            id: id.into(),
            quantity,
        }
    }

    /// `REMOVE_FROM_CART`
    #[must_use]
    pub fn remove_from_cart(id: impl Into<ProductId>) -> Self {
        Self::RemoveFromCart { id: id.into() }
    }

    /// `SAVE_FOR_LATER`
    #[must_use]
    pub fn save_for_later(id: impl Into<ProductId>) -> Self {
        Self::SaveForLater { id: id.into() }
    }

    /// `MOVE_TO_CART`
    #[must_use]
    pub fn move_to_cart(id: impl Into<ProductId>) -> Self {
        Self::MoveToCart { id: id.into() }
    }

    /// `ADD_TO_WISHLIST` with medium priority and no notes
    #[must_use]
    pub const fn add_to_wishlist(product: Product) -> Self {
        Self::AddToWishlist {
            product,
            priority: WishlistPriority::Medium,
            notes: None,
        }
    }

    /// `ADD_TO_WISHLIST` with explicit priority and notes
    #[must_use]
    pub fn add_to_wishlist_with(
        product: Product,
        priority: WishlistPriority,
        notes: Option<&str>,
    ) -> Self {
        Self::AddToWishlist {
            product,
            priority,
            notes: notes.map(str::to_string),
        }
    }

    /// `REMOVE_FROM_WISHLIST`
    #[must_use]
    pub fn remove_from_wishlist(id: impl Into<ProductId>) -> Self {
        Self::RemoveFromWishlist { id: id.into() }
    }

    /// `UPDATE_FILTERS`
    #[must_use]
    pub const fn update_filters(update: FilterUpdate) -> Self {
        Self::UpdateFilters { update }
    }

    /// `SET_LOADING`
    #[must_use]
    pub fn set_loading(key: impl Into<String>, loading: bool) -> Self {
        Self::SetLoading {
            key: key.into(),
            loading,
        }
    }

    /// `ADD_RECENTLY_VIEWED`
    #[must_use]
    pub fn add_recently_viewed(id: impl Into<ProductId>) -> Self {
        Self::AddRecentlyViewed { id: id.into() }
    }

    /// `RESERVE_ITEM`
    #[must_use]
    pub fn reserve_item(id: impl Into<ProductId>, quantity: u32) -> Self {
        Self::ReserveItem {
            id: id.into(),
            quantity,
        }
    }

    /// `RELEASE_ITEM`
    #[must_use]
    pub fn release_item(id: impl Into<ProductId>) -> Self {
        Self::ReleaseItem { id: id.into() }
    }

    /// `ADJUST_RESERVATION`
    #[must_use]
    pub fn adjust_reservation(id: impl Into<ProductId>, quantity: i64) -> Self {
        Self::AdjustReservation {
            id: id.into(),
            quantity,
        }
    }

    /// `TOGGLE_WISHLIST`
    #[must_use]
    pub const fn toggle_wishlist(product: Product) -> Self {
        Self::ToggleWishlist { product }
    }

    /// Payload as JSON, without the type tag
    ///
    /// `Null` for actions without fields.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut tagged)) => {
                tagged.remove("payload").unwrap_or(serde_json::Value::Null)
            },
            Ok(_) | Err(_) => serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::catalog::seed_products;
    use storefront_core::action::Action;

    #[test]
    fn test_action_types() {
        assert_eq!(StorefrontAction::ClearCart.action_type(), "CLEAR_CART");
        assert_eq!(
            StorefrontAction::add_recently_viewed("1").action_type(),
            "ADD_RECENTLY_VIEWED"
        );
        assert_eq!(
            StorefrontAction::adjust_reservation("1", 2).action_type(),
            "ADJUST_RESERVATION"
        );
        assert_eq!(StorefrontAction::action_types().len(), 20);
    }

    #[test]
    fn test_serialized_type_matches_action_type() {
        let action = StorefrontAction::update_quantity("3", -1);
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(json["type"], action.action_type());
        assert_eq!(json["payload"]["id"], "3");
        assert_eq!(json["payload"]["quantity"], -1);
    }

    #[test]
    fn test_payload_strips_tag() {
        let product = seed_products().remove(1);
        let payload = StorefrontAction::add_to_cart(product, 2).payload();

        assert_eq!(payload["quantity"], 2);
        assert_eq!(payload["product"]["name"], "Smart Watch Pro");
        assert!(StorefrontAction::ClearCart.payload().is_null());
    }

    #[test]
    fn test_wishlist_constructor_defaults() {
        let product = seed_products().remove(0);
        assert!(matches!(
            StorefrontAction::add_to_wishlist(product),
            StorefrontAction::AddToWishlist {
                priority: WishlistPriority::Medium,
                notes: None,
                ..
            }
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let action = StorefrontAction::SetSortBy {
            sort_by: Some(SortBy::PriceAsc),
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: StorefrontAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
