//! Storefront demo binary
//!
//! Walks a shopper through the seeded catalog: browsing, filtering,
//! reserving stock, saving for later and wishlisting. Analytics records and
//! store activity go to the log; the final state and the Prometheus metrics
//! are printed.
//!
//! ```bash
//! RUST_LOG=storefront=info,storefront_runtime=debug cargo run -p storefront
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use storefront::query::visible_products_in;
use storefront::selectors::{cart_summary, discount_percent, recent_products};
use storefront::types::{Category, FilterUpdate, SortBy, ViewMode};
use storefront::{
    AnalyticsMiddleware, StorefrontAction, StorefrontConfig, StorefrontEnvironment, StorefrontReducer,
    StorefrontState, StorefrontStore,
};
use storefront_core::environment::{Clock, SystemClock};
use storefront_runtime::metrics::MetricsRecorder;
use storefront_runtime::LoggingMiddleware;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info,storefront_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env()?;
    let mut recorder = MetricsRecorder::new();
    recorder.install()?;

    println!("=== Storefront ===\n");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let analytics = AnalyticsMiddleware::new(&config, clock.clone());
    let state = StorefrontState::new(clock.now(), storefront::catalog::seed_products(), &config);
    let env = StorefrontEnvironment::new(clock, config);

    let mut store: StorefrontStore = StorefrontStore::new(state, StorefrontReducer::new(), env)
        .with_middleware(LoggingMiddleware)
        .with_middleware(analytics);

    let transitions = Rc::new(Cell::new(0usize));
    let counter = transitions.clone();
    let subscription = store.subscribe(move |_state| counter.set(counter.get() + 1));

    println!(">>> Browsing");
    store.dispatch(StorefrontAction::set_loading("products", true));
    store.dispatch(StorefrontAction::set_loading("products", false));
    store.dispatch(StorefrontAction::add_recently_viewed("1"));
    store.dispatch(StorefrontAction::add_recently_viewed("3"));
    store.dispatch(StorefrontAction::add_recently_viewed("1"));
    store.dispatch(StorefrontAction::SetViewMode { mode: ViewMode::List });
    print_catalog(&store);

    println!("\n>>> Electronics rated 4 and up, cheapest first");
    store.dispatch(StorefrontAction::update_filters(
        FilterUpdate::new()
            .categories([Category::Electronics])
            .min_rating(4.0),
    ));
    store.dispatch(StorefrontAction::SetSortBy {
        sort_by: Some(SortBy::PriceAsc),
    });
    print_catalog(&store);

    store.dispatch(StorefrontAction::ResetFilters);

    println!("\n>>> Reserving stock");
    store.dispatch(StorefrontAction::reserve_item("1", 1));
    store.dispatch(StorefrontAction::reserve_item("3", 2));
    store.dispatch(StorefrontAction::reserve_item("4", 5));
    if let Some(reason) = &store.state().last_rejection {
        println!("Rejected: {reason}");
    }
    store.dispatch(StorefrontAction::adjust_reservation("3", 3));

    println!("\n>>> Saving the headphones for later, wishlisting the jacket");
    store.dispatch(StorefrontAction::save_for_later("1"));
    if let Some(jacket) = store.state().catalog.get(&"5".into()).cloned() {
        store.dispatch(StorefrontAction::toggle_wishlist(jacket));
    }

    let state = store.state();
    let config = &store.environment().config;
    let summary = cart_summary(state, config);

    println!("\n--- Cart ---");
    for line in &state.cart.items {
        println!("{:>3} x {:<32} {:>9.2}", line.quantity, line.product.name, line.line_total());
    }
    for line in &state.cart.saved_for_later {
        println!("saved {:<34}", line.product.name);
    }
    println!(
        "items {}  subtotal {:.2}  shipping {:.2}  total {:.2}",
        summary.item_count, summary.subtotal, summary.shipping, summary.total
    );

    println!("\n--- Wishlist ---");
    for entry in &state.wishlist.items {
        println!("{} ({})", entry.product.name, entry.priority);
    }

    println!("\n--- Recently viewed ---");
    for product in recent_products(state, config) {
        println!("{}", product.name);
    }

    println!("\nTransitions observed by the subscriber: {}", transitions.get());
    subscription.unsubscribe();

    if let Some(rendered) = recorder.render() {
        println!("\n--- Metrics ---\n{rendered}");
    }

    Ok(())
}

fn print_catalog(store: &StorefrontStore) {
    for product in visible_products_in(store.state()) {
        let discount = discount_percent(product);
        let badge = if discount > 0 {
            format!(" -{discount}%")
        } else {
            String::new()
        };
        println!(
            "{:<32} {:>9.2}{badge}  stock {:>2}  rating {:.1}",
            product.name, product.price, product.stock, product.rating
        );
    }
}
