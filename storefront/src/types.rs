//! Domain types for the storefront.
//!
//! Products, cart lines, wishlist entries, history records and the filter
//! and view settings the catalog display is driven by. All of them are plain
//! values; the state tree in [`crate::state`] owns them.

use chrono::{DateTime, Utc};
use im::OrdSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

/// Unique identifier for a product
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a `ProductId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier for a cart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(Uuid);

impl CartId {
    /// Creates a new random `CartId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product category
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Category {
    /// Phones, audio, wearables
    Electronics,
    /// Apparel
    Clothing,
    /// Books
    Books,
    /// Home and living
    Home,
    /// Sports and outdoors
    Sports,
}

/// A product in the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Current price
    pub price: f64,
    /// Price before discount, if discounted
    pub original_price: Option<f64>,
    /// Long description
    pub description: String,
    /// Category
    pub category: Category,
    /// Units available
    pub stock: u32,
    /// Average rating, 0 to 5
    pub rating: f64,
    /// Number of reviews
    pub reviews_count: u32,
    /// Image file names
    pub images: Vec<String>,
    /// Shipping weight in kilograms
    pub weight: f64,
    /// Search tags
    pub tags: Vec<String>,
    /// When the product was listed
    pub created_at: DateTime<Utc>,
    /// Popularity score
    pub popularity: u32,
}

impl Product {
    /// Whether at least one unit is available
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A line in the cart or in the saved-for-later list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product snapshot taken when the line was created
    pub product: Product,
    /// Always greater than zero
    pub quantity: u32,
    /// When the line was created
    pub added_at: DateTime<Utc>,
    /// True while the line sits in the saved-for-later list
    pub saved_for_later: bool,
}

impl CartLineItem {
    /// Creates a cart line
    #[must_use]
    pub const fn new(product: Product, quantity: u32, added_at: DateTime<Utc>) -> Self {
        Self {
            product,
            quantity,
            added_at,
            saved_for_later: false,
        }
    }

    /// Id of the product on this line
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price times quantity
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Wishlist priority
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WishlistPriority {
    /// Nice to have
    Low,
    /// Default priority
    #[default]
    Medium,
    /// Wanted most
    High,
}

/// An entry in the wishlist
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    /// Product snapshot
    pub product: Product,
    /// Priority
    pub priority: WishlistPriority,
    /// When the entry was added
    pub added_at: DateTime<Utc>,
    /// Free-text notes
    pub notes: Option<String>,
}

/// A product view, newest first in the history list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyViewedRecord {
    /// Viewed product
    pub product_id: ProductId,
    /// When it was viewed
    pub timestamp: DateTime<Utc>,
}

/// Inclusive price range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl PriceRange {
    /// Creates a price range
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `price` lies within the range, bounds included
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0.0, 1000.0)
    }
}

/// Catalog filters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Selected categories; empty means every category
    pub categories: OrdSet<Category>,
    /// Inclusive price range
    pub price_range: PriceRange,
    /// Only products with stock
    pub in_stock: bool,
    /// Minimum rating
    pub min_rating: f64,
    /// Free-text search
    pub search_query: String,
}

impl FilterState {
    /// Default filters with a custom price range
    #[must_use]
    pub fn with_price_range(price_range: PriceRange) -> Self {
        Self {
            categories: OrdSet::new(),
            price_range,
            in_stock: false,
            min_rating: 0.0,
            search_query: String::new(),
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_price_range(PriceRange::default())
    }
}

/// Partial filter update; `None` fields keep their current value
///
/// # Example
///
/// ```
/// use storefront::types::{Category, FilterState, FilterUpdate};
///
/// let mut filters = FilterState::default();
/// FilterUpdate::new()
///     .categories([Category::Electronics])
///     .min_rating(4.0)
///     .apply_to(&mut filters);
///
/// assert!(filters.categories.contains(&Category::Electronics));
/// assert!(filters.search_query.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    /// Replacement category set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<OrdSet<Category>>,
    /// Replacement price range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    /// Replacement in-stock flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Replacement minimum rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    /// Replacement search query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl FilterUpdate {
    /// An update that changes nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected categories
    #[must_use]
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    /// Replace the price range
    #[must_use]
    pub const fn price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    /// Replace the in-stock flag
    #[must_use]
    pub const fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Replace the minimum rating
    #[must_use]
    pub const fn min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    /// Replace the search query
    #[must_use]
    pub fn search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Whether the update carries no field
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.categories.is_none()
            && self.price_range.is_none()
            && self.in_stock.is_none()
            && self.min_rating.is_none()
            && self.search_query.is_none()
    }

    /// Shallow merge into `filters`
    pub fn apply_to(self, filters: &mut FilterState) {
        if let Some(categories) = self.categories {
            filters.categories = categories;
        }
        if let Some(price_range) = self.price_range {
            filters.price_range = price_range;
        }
        if let Some(in_stock) = self.in_stock {
            filters.in_stock = in_stock;
        }
        if let Some(min_rating) = self.min_rating {
            filters.min_rating = min_rating;
        }
        if let Some(search_query) = self.search_query {
            filters.search_query = search_query;
        }
    }
}

/// Catalog layout
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    /// Card grid
    #[default]
    Grid,
    /// One product per row
    List,
}

/// Sort key for the catalog display
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    /// Name, A to Z
    NameAsc,
    /// Name, Z to A
    NameDesc,
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Best rated first
    RatingDesc,
    /// Most popular first
    PopularityDesc,
}

/// User display preferences
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// ISO currency code
    pub currency: String,
    /// Language tag
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            language: "en".to_string(),
        }
    }
}
