//! End-to-end shopping scenarios through the store

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use storefront::query::visible_products_in;
use storefront::selectors::{cart_summary, is_in_cart, is_saved_for_later, is_wishlisted};
use storefront::types::{Category, FilterUpdate, ProductId, WishlistPriority};
use storefront::{
    AnalyticsMiddleware, BufferedAnalyticsSink, StorefrontAction, StorefrontConfig, StorefrontEnvironment,
    StorefrontReducer, StorefrontState, StorefrontStore,
};
use storefront_core::environment::Clock;
use storefront_testing::{ManualClock, RecordingMiddleware, test_clock};

struct Harness {
    store: StorefrontStore,
    analytics: BufferedAnalyticsSink,
    recorded: RecordingMiddleware<StorefrontAction>,
}

fn harness() -> Harness {
    let clock: Arc<dyn Clock> = Arc::new(test_clock());
    let config = StorefrontConfig::default();
    let analytics = BufferedAnalyticsSink::new();
    let recorded = RecordingMiddleware::new();

    let store = StorefrontStore::new(
        StorefrontState::new(clock.now(), storefront::catalog::seed_products(), &config),
        StorefrontReducer::new(),
        StorefrontEnvironment::new(clock.clone(), config.clone()),
    )
    .with_middleware(recorded.clone())
    .with_middleware(AnalyticsMiddleware::with_sink(&config, clock, analytics.clone()));

    Harness {
        store,
        analytics,
        recorded,
    }
}

fn product(store: &StorefrontStore, id: &str) -> storefront::types::Product {
    store
        .state()
        .catalog
        .get(&ProductId::new(id))
        .cloned()
        .unwrap()
}

fn stock(store: &StorefrontStore, id: &str) -> u32 {
    product(store, id).stock
}

fn quantity(store: &StorefrontStore, id: &str) -> Option<u32> {
    store
        .state()
        .cart
        .line(&ProductId::new(id))
        .map(|line| line.quantity)
}

#[test]
fn test_repeated_add_accumulates_quantity() {
    let mut h = harness();
    let headphones = product(&h.store, "1");

    h.store.dispatch(StorefrontAction::add_to_cart(headphones.clone(), 2));
    h.store.dispatch(StorefrontAction::add_to_cart(headphones, 3));

    assert_eq!(h.store.state().cart.items.len(), 1);
    assert_eq!(quantity(&h.store, "1"), Some(5));
}

#[test]
fn test_duplicate_wishlist_add_keeps_first_entry() {
    let mut h = harness();
    let watch = product(&h.store, "2");

    h.store.dispatch(StorefrontAction::add_to_wishlist_with(
        watch.clone(),
        WishlistPriority::High,
        Some("gift idea"),
    ));
    h.store.dispatch(StorefrontAction::add_to_wishlist_with(
        watch,
        WishlistPriority::Low,
        Some("changed my mind"),
    ));

    let wishlist = &h.store.state().wishlist;
    assert_eq!(wishlist.items.len(), 1);
    let entry = wishlist.get(&ProductId::new("2")).unwrap();
    assert_eq!(entry.priority, WishlistPriority::High);
    assert_eq!(entry.notes.as_deref(), Some("gift idea"));

    // both attempts are still reported
    assert_eq!(h.analytics.events().len(), 2);
}

#[test]
fn test_recently_viewed_moves_repeat_to_front() {
    let mut h = harness();

    h.store.dispatch(StorefrontAction::add_recently_viewed("1"));
    h.store.dispatch(StorefrontAction::add_recently_viewed("2"));
    h.store.dispatch(StorefrontAction::add_recently_viewed("1"));

    let ids: Vec<&str> = h
        .store
        .state()
        .user
        .recently_viewed_ids()
        .map(ProductId::as_str)
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_electronics_rated_four_and_up() {
    let mut h = harness();

    h.store.dispatch(StorefrontAction::update_filters(
        FilterUpdate::new()
            .categories([Category::Electronics])
            .min_rating(4.0),
    ));
    h.store.dispatch(StorefrontAction::SetSortBy { sort_by: None });

    let ids: Vec<&str> = visible_products_in(h.store.state())
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_quantity_zero_or_negative_removes_line() {
    let mut h = harness();
    let mat = product(&h.store, "3");

    h.store.dispatch(StorefrontAction::add_to_cart(mat.clone(), 2));
    h.store.dispatch(StorefrontAction::update_quantity("3", 0));
    assert!(!is_in_cart(h.store.state(), &ProductId::new("3")));

    h.store.dispatch(StorefrontAction::add_to_cart(mat, 2));
    h.store.dispatch(StorefrontAction::update_quantity("3", -1));
    assert!(h.store.state().cart.items.is_empty());
}

#[test]
fn test_remove_twice_equals_remove_once() {
    let mut h = harness();
    h.store.dispatch(StorefrontAction::add_to_cart(product(&h.store, "1"), 1));
    h.store.dispatch(StorefrontAction::add_to_cart(product(&h.store, "2"), 1));

    h.store.dispatch(StorefrontAction::remove_from_cart("1"));
    let once = h.store.snapshot();
    h.store.dispatch(StorefrontAction::remove_from_cart("1"));

    assert_eq!(h.store.snapshot(), once);
}

#[test]
fn test_save_then_move_restores_line() {
    let clock = Arc::new(ManualClock::new(test_clock().now()));
    let env = StorefrontEnvironment::with_clock(clock.clone());
    let mut store =
        StorefrontStore::new(StorefrontState::seeded(clock.now()), StorefrontReducer::new(), env);
    let novels = store.state().catalog.get(&ProductId::new("4")).cloned().unwrap();

    store.dispatch(StorefrontAction::add_to_cart(novels, 2));
    let original = store.state().cart.line(&ProductId::new("4")).cloned().unwrap();

    clock.advance(chrono::Duration::minutes(5));
    store.dispatch(StorefrontAction::save_for_later("4"));
    assert!(is_saved_for_later(store.state(), &ProductId::new("4")));
    assert!(!is_in_cart(store.state(), &ProductId::new("4")));

    clock.advance(chrono::Duration::minutes(5));
    store.dispatch(StorefrontAction::move_to_cart("4"));

    assert_eq!(store.state().cart.line(&ProductId::new("4")), Some(&original));
    assert!(store.state().cart.saved_for_later.is_empty());
}

#[test]
fn test_clear_cart_keeps_saved_lines() {
    let mut h = harness();
    h.store.dispatch(StorefrontAction::add_to_cart(product(&h.store, "1"), 1));
    h.store.dispatch(StorefrontAction::add_to_cart(product(&h.store, "3"), 1));
    h.store.dispatch(StorefrontAction::save_for_later("3"));

    h.store.dispatch(StorefrontAction::ClearCart);

    assert!(h.store.state().cart.items.is_empty());
    assert_eq!(h.store.state().cart.saved_for_later.len(), 1);
}

#[test]
fn test_reserve_moves_stock_into_cart() {
    let mut h = harness();

    h.store.dispatch(StorefrontAction::reserve_item("3", 2));

    assert_eq!(quantity(&h.store, "3"), Some(2));
    assert_eq!(stock(&h.store, "3"), 23);
    assert!(h.store.state().last_rejection.is_none());

    let types: Vec<&str> = h
        .recorded
        .actions()
        .iter()
        .map(storefront_core::action::Action::action_type)
        .collect();
    assert_eq!(types, vec!["RESERVE_ITEM", "ADD_TO_CART", "UPDATE_STOCK"]);
}

#[test]
fn test_analytics_sees_fed_back_actions() {
    let mut h = harness();

    h.store.dispatch(StorefrontAction::reserve_item("1", 1));
    h.store.dispatch(StorefrontAction::release_item("1"));
    h.store.dispatch(StorefrontAction::toggle_wishlist(product(&h.store, "2")));
    h.store.dispatch(StorefrontAction::set_loading("products", true));

    let types: Vec<&str> = h.analytics.events().iter().map(|e| e.action_type).collect();
    assert_eq!(types, vec!["ADD_TO_CART", "REMOVE_FROM_CART", "ADD_TO_WISHLIST"]);
    assert_eq!(stock(&h.store, "1"), 15);
}

#[test]
fn test_middleware_does_not_change_actions() {
    let mut h = harness();
    let action = StorefrontAction::add_to_cart(product(&h.store, "2"), 1);

    h.store.dispatch(action.clone());

    assert_eq!(h.recorded.actions(), vec![action]);
    assert_eq!(quantity(&h.store, "2"), Some(1));
}

#[test]
fn test_rejected_reservation_leaves_cart_and_stock() {
    let mut h = harness();

    h.store.dispatch(StorefrontAction::reserve_item("4", 10));

    assert!(h.store.state().cart.items.is_empty());
    assert_eq!(stock(&h.store, "4"), 3);
    assert!(h.store.state().last_rejection.is_some());
    assert_eq!(h.recorded.len(), 1);
    assert!(h.analytics.events().is_empty());
}

#[test]
fn test_adjust_reservation_round_trip() {
    let mut h = harness();

    h.store.dispatch(StorefrontAction::reserve_item("2", 2));
    h.store.dispatch(StorefrontAction::adjust_reservation("2", 5));
    assert_eq!(quantity(&h.store, "2"), Some(5));
    assert_eq!(stock(&h.store, "2"), 3);

    h.store.dispatch(StorefrontAction::adjust_reservation("2", 0));
    assert_eq!(quantity(&h.store, "2"), None);
    assert_eq!(stock(&h.store, "2"), 8);
}

#[test]
fn test_subscriber_sees_every_step_of_a_flow() {
    let mut h = harness();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let subscription = h.store.subscribe(move |state: &StorefrontState| {
        let line = state.cart.line(&ProductId::new("3")).map(|l| l.quantity);
        let stock = state.catalog.get(&ProductId::new("3")).map(|p| p.stock);
        sink.borrow_mut().push((line, stock));
    });

    h.store.dispatch(StorefrontAction::reserve_item("3", 4));

    assert_eq!(
        *seen.borrow(),
        vec![(None, Some(25)), (Some(4), Some(25)), (Some(4), Some(21))]
    );

    assert!(subscription.unsubscribe());
    h.store.dispatch(StorefrontAction::ClearCart);
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn test_summary_after_shopping() {
    let mut h = harness();

    h.store.dispatch(StorefrontAction::reserve_item("3", 1));
    let summary = cart_summary(h.store.state(), &StorefrontConfig::default());
    assert!((summary.total - 59.98).abs() < 1e-9);

    h.store.dispatch(StorefrontAction::reserve_item("4", 1));
    let summary = cart_summary(h.store.state(), &StorefrontConfig::default());
    assert_eq!(summary.item_count, 2);
    assert!(summary.shipping.abs() < f64::EPSILON);
    assert!(!is_wishlisted(h.store.state(), &ProductId::new("4")));
}

#[test]
fn test_stores_are_independent() {
    let mut first = harness();
    let second = harness();

    first.store.dispatch(StorefrontAction::reserve_item("1", 1));

    assert_eq!(stock(&first.store, "1"), 14);
    assert_eq!(stock(&second.store, "1"), 15);
}
