//! State invariants over random action sequences

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use storefront::catalog::seed_products;
use storefront::types::{ProductId, SortBy, ViewMode, WishlistPriority};
use storefront::{StorefrontAction, StorefrontEnvironment, StorefrontReducer, StorefrontState, StorefrontStore};
use storefront_core::environment::Clock;
use storefront_testing::test_clock;

const IDS: [&str; 6] = ["1", "2", "3", "4", "5", "missing"];

fn arb_id() -> impl Strategy<Value = ProductId> {
    prop::sample::select(IDS.to_vec()).prop_map(ProductId::new)
}

fn arb_product() -> impl Strategy<Value = storefront::types::Product> {
    prop::sample::select(seed_products())
}

fn arb_inventory_action() -> impl Strategy<Value = StorefrontAction> {
    prop_oneof![
        (arb_id(), 0u32..6).prop_map(|(id, q)| StorefrontAction::ReserveItem { id, quantity: q }),
        arb_id().prop_map(|id| StorefrontAction::ReleaseItem { id }),
        (arb_id(), -2i64..8).prop_map(|(id, q)| StorefrontAction::AdjustReservation { id, quantity: q }),
    ]
}

fn arb_action() -> impl Strategy<Value = StorefrontAction> {
    prop_oneof![
        (arb_product(), 0u32..5).prop_map(|(p, q)| StorefrontAction::add_to_cart(p, q)),
        (arb_id(), -3i64..6).prop_map(|(id, q)| StorefrontAction::UpdateQuantity { id, quantity: q }),
        arb_id().prop_map(|id| StorefrontAction::RemoveFromCart { id }),
        arb_id().prop_map(|id| StorefrontAction::SaveForLater { id }),
        arb_id().prop_map(|id| StorefrontAction::MoveToCart { id }),
        Just(StorefrontAction::ClearCart),
        (arb_id(), 0u32..30).prop_map(|(id, stock)| StorefrontAction::UpdateStock { id, stock }),
        arb_product().prop_map(|p| StorefrontAction::add_to_wishlist_with(p, WishlistPriority::High, None)),
        arb_id().prop_map(|id| StorefrontAction::RemoveFromWishlist { id }),
        arb_product().prop_map(StorefrontAction::toggle_wishlist),
        arb_id().prop_map(|id| StorefrontAction::AddRecentlyViewed { id }),
        Just(StorefrontAction::SetViewMode { mode: ViewMode::List }),
        Just(StorefrontAction::SetSortBy { sort_by: Some(SortBy::PriceDesc) }),
        Just(StorefrontAction::ResetFilters),
        arb_inventory_action(),
    ]
}

fn store() -> StorefrontStore {
    let clock: Arc<dyn Clock> = Arc::new(test_clock());
    StorefrontStore::new(
        StorefrontState::seeded(clock.now()),
        StorefrontReducer::new(),
        StorefrontEnvironment::with_clock(clock),
    )
}

fn check_invariants(state: &StorefrontState) -> Result<(), TestCaseError> {
    let cart: Vec<&ProductId> = state.cart.items.iter().map(|l| l.product_id()).collect();
    let saved: Vec<&ProductId> = state.cart.saved_for_later.iter().map(|l| l.product_id()).collect();
    let cart_set: HashSet<&ProductId> = cart.iter().copied().collect();
    let saved_set: HashSet<&ProductId> = saved.iter().copied().collect();

    prop_assert_eq!(cart.len(), cart_set.len(), "duplicate cart line");
    prop_assert_eq!(saved.len(), saved_set.len(), "duplicate saved line");
    prop_assert!(cart_set.is_disjoint(&saved_set), "line both in cart and saved");
    prop_assert!(state.cart.items.iter().all(|l| l.quantity > 0 && !l.saved_for_later));
    prop_assert!(state.cart.saved_for_later.iter().all(|l| l.saved_for_later));

    let wished: HashSet<&ProductId> = state.wishlist.items.iter().map(|e| &e.product.id).collect();
    prop_assert_eq!(wished.len(), state.wishlist.items.len(), "duplicate wishlist entry");

    let viewed: HashSet<&ProductId> = state.user.recently_viewed_ids().collect();
    prop_assert_eq!(viewed.len(), state.user.recently_viewed.len(), "duplicate view record");
    prop_assert!(state.user.recently_viewed.len() <= 10);
    Ok(())
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_dispatch(actions in prop::collection::vec(arb_action(), 0..60)) {
        let mut store = store();
        for action in actions {
            store.dispatch(action);
            check_invariants(store.state())?;
        }
    }

    #[test]
    fn prop_remove_from_cart_is_idempotent(
        actions in prop::collection::vec(arb_action(), 0..30),
        id in arb_id(),
    ) {
        let mut store = store();
        for action in actions {
            store.dispatch(action);
        }

        store.dispatch(StorefrontAction::RemoveFromCart { id: id.clone() });
        let once = store.snapshot();
        store.dispatch(StorefrontAction::RemoveFromCart { id });
        prop_assert_eq!(store.snapshot(), once);
    }

    #[test]
    fn prop_inventory_flows_conserve_units(actions in prop::collection::vec(arb_inventory_action(), 0..40)) {
        let mut store = store();
        let initial: Vec<(ProductId, u32)> = seed_products().into_iter().map(|p| (p.id, p.stock)).collect();

        for action in actions {
            store.dispatch(action);

            for (id, stock) in &initial {
                let state = store.state();
                let in_stock = state.catalog.get(id).map_or(0, |p| p.stock);
                let in_cart = state.cart.line(id).map_or(0, |l| l.quantity);
                prop_assert_eq!(in_stock + in_cart, *stock, "units of {} not conserved", id);
            }
        }
    }
}
