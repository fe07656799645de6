//! Filter and sort pipeline for the catalog display.
//!
//! A pure query over the catalog: nothing here touches the state tree.
//!
//! Filters apply in this order:
//! 1. search query, case-insensitive, against name, description and tags
//! 2. category membership, if any category is selected
//! 3. price range, bounds included
//! 4. stock above zero, if `in_stock` is set
//! 5. rating at or above `min_rating`
//!
//! The result is then stably sorted by the sort key. Without a key it stays
//! in catalog order.

use crate::state::{CatalogState, StorefrontState};
use crate::types::{FilterState, Product, SortBy};
use std::cmp::Ordering;

/// Whether `product` passes every filter
#[must_use]
pub fn matches(product: &Product, filters: &FilterState) -> bool {
    matches_search(product, &filters.search_query)
        && (filters.categories.is_empty() || filters.categories.contains(&product.category))
        && filters.price_range.contains(product.price)
        && (!filters.in_stock || product.in_stock())
        && product.rating >= filters.min_rating
}

fn matches_search(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Ordering of two products under `sort_by`
#[must_use]
pub fn compare(a: &Product, b: &Product, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::NameAsc => compare_names(a, b),
        SortBy::NameDesc => compare_names(b, a),
        SortBy::PriceAsc => a.price.total_cmp(&b.price),
        SortBy::PriceDesc => b.price.total_cmp(&a.price),
        SortBy::RatingDesc => b.rating.total_cmp(&a.rating),
        SortBy::PopularityDesc => b.popularity.cmp(&a.popularity),
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Filtered and sorted products, in display order
///
/// # Example
///
/// ```
/// use storefront::catalog::seed_products;
/// use storefront::query::visible_products;
/// use storefront::state::CatalogState;
/// use storefront::types::{FilterState, SortBy};
/// use chrono::Utc;
///
/// let catalog = CatalogState::new(seed_products(), Utc::now());
/// let filters = FilterState { in_stock: true, ..FilterState::default() };
///
/// let cheapest = visible_products(&catalog, &filters, Some(SortBy::PriceAsc));
/// assert_eq!(cheapest[0].name, "Eco-Friendly Yoga Mat");
/// assert_eq!(cheapest.len(), 4);
/// ```
#[must_use]
pub fn visible_products<'a>(
    catalog: &'a CatalogState,
    filters: &FilterState,
    sort_by: Option<SortBy>,
) -> Vec<&'a Product> {
    let mut products: Vec<&Product> = catalog
        .products()
        .filter(|product| matches(product, filters))
        .collect();

    if let Some(sort_by) = sort_by {
        // stable: equal keys keep catalog order
        products.sort_by(|a, b| compare(a, b, sort_by));
    }

    products
}

/// [`visible_products`] with the filters and sort key held in `state`
#[must_use]
pub fn visible_products_in(state: &StorefrontState) -> Vec<&Product> {
    visible_products(&state.catalog, &state.ui.filters, state.ui.sort_by)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_products;
    use crate::types::{Category, FilterUpdate};
    use storefront_core::environment::Clock;
    use storefront_testing::test_clock;

    fn catalog() -> CatalogState {
        CatalogState::new(seed_products(), test_clock().now())
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn filtered(update: FilterUpdate) -> FilterState {
        let mut filters = FilterState::default();
        update.apply_to(&mut filters);
        filters
    }

    #[test]
    fn test_no_filters_no_sort_is_catalog_order() {
        let catalog = catalog();
        let products = visible_products(&catalog, &FilterState::default(), None);
        assert_eq!(ids(&products), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_search_matches_tags_case_insensitively() {
        let catalog = catalog();
        let filters = filtered(FilterUpdate::new().search_query("FITNESS"));
        let products = visible_products(&catalog, &filters, None);
        assert_eq!(ids(&products), vec!["2", "3"]);
    }

    #[test]
    fn test_search_matches_description() {
        let catalog = catalog();
        let filters = filtered(FilterUpdate::new().search_query("battery"));
        assert_eq!(ids(&visible_products(&catalog, &filters, None)), vec!["1"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = catalog();
        let filters = filtered(FilterUpdate::new().price_range(49.99, 79.99));
        assert_eq!(ids(&visible_products(&catalog, &filters, None)), vec!["3", "4"]);
    }

    #[test]
    fn test_in_stock_excludes_jacket() {
        let catalog = catalog();
        let filters = filtered(FilterUpdate::new().in_stock(true));
        let products = visible_products(&catalog, &filters, None);
        assert!(!ids(&products).contains(&"5".to_string()));
    }

    #[test]
    fn test_category_and_rating() {
        let catalog = catalog();
        let filters = filtered(
            FilterUpdate::new()
                .categories([Category::Electronics, Category::Books])
                .min_rating(4.6),
        );
        assert_eq!(ids(&visible_products(&catalog, &filters, None)), vec!["2", "4"]);
    }

    #[test]
    fn test_sort_keys() {
        let catalog = catalog();
        let all = FilterState::default();
        let sorted = |key| ids(&visible_products(&catalog, &all, Some(key)));

        assert_eq!(sorted(SortBy::PriceAsc), vec!["3", "4", "5", "1", "2"]);
        assert_eq!(sorted(SortBy::PriceDesc), vec!["2", "1", "5", "4", "3"]);
        assert_eq!(sorted(SortBy::NameAsc), vec!["4", "5", "3", "1", "2"]);
        assert_eq!(sorted(SortBy::NameDesc), vec!["2", "1", "3", "5", "4"]);
        assert_eq!(sorted(SortBy::RatingDesc), vec!["3", "2", "4", "1", "5"]);
        assert_eq!(sorted(SortBy::PopularityDesc), vec!["4", "1", "2", "3", "5"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut products = seed_products();
        for product in &mut products {
            product.popularity = 50;
        }
        let catalog = CatalogState::new(products, test_clock().now());

        let sorted = visible_products(&catalog, &FilterState::default(), Some(SortBy::PopularityDesc));
        assert_eq!(ids(&sorted), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let mut products = seed_products();
        products[1].name = "apple watch".to_string();
        let catalog = CatalogState::new(products, test_clock().now());

        let sorted = visible_products(&catalog, &FilterState::default(), Some(SortBy::NameAsc));
        assert_eq!(ids(&sorted)[0], "2");
    }
}
