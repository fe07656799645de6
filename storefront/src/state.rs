//! The storefront state tree.
//!
//! One struct per slice, each owned by its own reducer. Collections are
//! persistent (`im`) so cloning the whole tree for a snapshot shares
//! structure with the live state.

use crate::config::StorefrontConfig;
use crate::types::{
    CartId, CartLineItem, FilterState, Preferences, Product, ProductId, RecentlyViewedRecord,
    SortBy, ViewMode, WishlistEntry,
};
use chrono::{DateTime, Utc};
use im::{HashMap, OrdSet, Vector};
use serde::{Deserialize, Serialize};

/// Product catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    /// Products indexed by id
    pub items: HashMap<ProductId, Product>,
    /// Catalog order: every id in `items`, each once, in insertion order
    pub order: Vector<ProductId>,
    /// When the catalog was last replaced
    pub last_updated: DateTime<Utc>,
}

impl CatalogState {
    /// Creates a catalog from `products`
    ///
    /// A repeated id keeps the position of its first occurrence and the data
    /// of its last.
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>, last_updated: DateTime<Utc>) -> Self {
        let mut catalog = Self {
            items: HashMap::new(),
            order: Vector::new(),
            last_updated,
        };
        catalog.replace(products, last_updated);
        catalog
    }

    /// Replaces every product
    pub fn replace(&mut self, products: impl IntoIterator<Item = Product>, at: DateTime<Utc>) {
        let mut items = HashMap::new();
        let mut order = Vector::new();
        for product in products {
            if !items.contains_key(&product.id) {
                order.push_back(product.id.clone());
            }
            items.insert(product.id.clone(), product);
        }
        self.items = items;
        self.order = order;
        self.last_updated = at;
    }

    /// Looks up a product
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.items.get(id)
    }

    /// Checks if a product exists
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.contains_key(id)
    }

    /// Products in catalog order
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Number of products
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart and saved-for-later lists
///
/// A product id appears at most once across both lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Active cart lines
    pub items: Vector<CartLineItem>,
    /// Lines parked for later
    pub saved_for_later: Vector<CartLineItem>,
    /// Cart identifier
    pub cart_id: CartId,
    /// Last time either list changed
    pub last_modified: DateTime<Utc>,
}

impl CartState {
    /// Creates an empty cart
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            items: Vector::new(),
            saved_for_later: Vector::new(),
            cart_id: CartId::new(),
            last_modified: now,
        }
    }

    /// Position of the cart line for `id`
    #[must_use]
    pub fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|line| line.product_id() == id)
    }

    /// Position of the saved line for `id`
    #[must_use]
    pub fn saved_position(&self, id: &ProductId) -> Option<usize> {
        self.saved_for_later
            .iter()
            .position(|line| line.product_id() == id)
    }

    /// Cart line for `id`
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.product_id() == id)
    }

    /// Saved line for `id`
    #[must_use]
    pub fn saved_line(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.saved_for_later
            .iter()
            .find(|line| line.product_id() == id)
    }

    /// Sum of quantities over the cart lines
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// Wishlist
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WishlistState {
    /// Entries in insertion order, at most one per product
    pub items: Vector<WishlistEntry>,
}

impl WishlistState {
    /// Entry for `id`
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&WishlistEntry> {
        self.items.iter().find(|entry| &entry.product.id == id)
    }

    /// Checks if `id` is wished for
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }
}

/// Display settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    /// Grid or list
    pub view_mode: ViewMode,
    /// Active sort key; `None` keeps catalog order
    pub sort_by: Option<SortBy>,
    /// Active filters
    pub filters: FilterState,
    /// Keys of operations currently loading
    pub loading: OrdSet<String>,
}

impl UiState {
    /// Checks a loading flag
    #[must_use]
    pub fn is_loading(&self, key: &str) -> bool {
        self.loading.contains(key)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Grid,
            sort_by: Some(SortBy::PopularityDesc),
            filters: FilterState::default(),
            loading: OrdSet::new(),
        }
    }
}

/// Session and browsing history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    /// Newest first, no duplicate product
    pub recently_viewed: Vector<RecentlyViewedRecord>,
    /// When the session began
    pub session_start: DateTime<Utc>,
    /// Display preferences
    pub preferences: Preferences,
}

impl UserState {
    /// Creates a fresh session
    #[must_use]
    pub fn new(session_start: DateTime<Utc>) -> Self {
        Self {
            recently_viewed: Vector::new(),
            session_start,
            preferences: Preferences::default(),
        }
    }

    /// Recently viewed ids, newest first
    pub fn recently_viewed_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.recently_viewed.iter().map(|record| &record.product_id)
    }
}

/// The whole storefront state tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorefrontState {
    /// Product catalog
    pub catalog: CatalogState,
    /// Cart and saved lines
    pub cart: CartState,
    /// Wishlist
    pub wishlist: WishlistState,
    /// Display settings
    pub ui: UiState,
    /// Session and history
    pub user: UserState,
    /// Why the last inventory operation was rejected, if it was
    pub last_rejection: Option<String>,
}

impl StorefrontState {
    /// Creates a state tree over `products`
    #[must_use]
    pub fn new(
        now: DateTime<Utc>,
        products: impl IntoIterator<Item = Product>,
        config: &StorefrontConfig,
    ) -> Self {
        Self {
            catalog: CatalogState::new(products, now),
            cart: CartState::new(now),
            wishlist: WishlistState::default(),
            ui: UiState {
                filters: FilterState::with_price_range(config.default_price_range),
                ..UiState::default()
            },
            user: UserState::new(now),
            last_rejection: None,
        }
    }

    /// Creates a state tree over the sample catalog with default settings
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::new(now, crate::catalog::seed_products(), &StorefrontConfig::default())
    }

    /// Creates a state tree with an empty catalog
    #[must_use]
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self::new(now, std::iter::empty(), &StorefrontConfig::default())
    }
}
