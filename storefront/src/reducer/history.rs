//! User slice: recently viewed products.

use super::StorefrontEnvironment;
use crate::actions::StorefrontAction;
use crate::state::UserState;
use crate::types::RecentlyViewedRecord;
use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for [`UserState`]
#[derive(Clone, Debug, Default)]
pub struct HistoryReducer;

impl HistoryReducer {
    /// Creates a new `HistoryReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for HistoryReducer {
    type State = UserState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::AddRecentlyViewed { id } => {
                state.recently_viewed.retain(|record| record.product_id != id);
                state.recently_viewed.push_front(RecentlyViewedRecord {
                    product_id: id,
                    timestamp: env.clock.now(),
                });
                let capacity = env.config.recently_viewed_capacity;
                // im's truncate asserts the length, unlike Vec's
                if state.recently_viewed.len() > capacity {
                    state.recently_viewed.truncate(capacity);
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
            | StorefrontAction::SetViewMode { .. }
            | StorefrontAction::SetSortBy { .. }
            | StorefrontAction::UpdateFilters { .. }
            | StorefrontAction::ResetFilters
            | StorefrontAction::SetLoading { .. }
            | StorefrontAction::ReserveItem { .. }
            | StorefrontAction::ReleaseItem { .. }
            | StorefrontAction::AdjustReservation { .. }
            | StorefrontAction::ToggleWishlist { .. } => {},
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::reducer::test_support::test_env;
    use chrono::Duration;
    use std::sync::Arc;
    use storefront_core::environment::Clock;
    use storefront_testing::{ManualClock, ReducerTest, test_clock};

    fn ids(state: &UserState) -> Vec<String> {
        state.recently_viewed_ids().map(ToString::to_string).collect()
    }

    #[test]
    fn test_first_view_below_capacity() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(test_env())
            .given_state(UserState::new(test_clock().now()))
            .when_action(StorefrontAction::add_recently_viewed("1"))
            .then_state(|state| assert_eq!(ids(state), vec!["1"]))
            .run();
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let env = StorefrontEnvironment::new(
            Arc::new(test_clock()),
            StorefrontConfig::default().with_recently_viewed_capacity(0),
        );

        ReducerTest::new(HistoryReducer::new())
            .with_env(env)
            .given_state(UserState::new(test_clock().now()))
            .when_action(StorefrontAction::add_recently_viewed("1"))
            .then_state(|state| assert!(state.recently_viewed.is_empty()))
            .run();
    }

    #[test]
    fn test_reviewed_product_moves_to_front() {
        ReducerTest::new(HistoryReducer::new())
            .with_env(test_env())
            .given_state(UserState::new(test_clock().now()))
            .given_action(StorefrontAction::add_recently_viewed("1"))
            .given_action(StorefrontAction::add_recently_viewed("2"))
            .when_action(StorefrontAction::add_recently_viewed("1"))
            .then_state(|state| assert_eq!(ids(state), vec!["1", "2"]))
            .run();
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let env = StorefrontEnvironment::new(
            Arc::new(test_clock()),
            StorefrontConfig::default().with_recently_viewed_capacity(3),
        );

        ReducerTest::new(HistoryReducer::new())
            .with_env(env)
            .given_state(UserState::new(test_clock().now()))
            .given_action(StorefrontAction::add_recently_viewed("1"))
            .given_action(StorefrontAction::add_recently_viewed("2"))
            .given_action(StorefrontAction::add_recently_viewed("3"))
            .when_action(StorefrontAction::add_recently_viewed("4"))
            .then_state(|state| assert_eq!(ids(state), vec!["4", "3", "2"]))
            .run();
    }

    #[test]
    fn test_default_capacity_is_ten() {
        let env = test_env();
        let mut state = UserState::new(test_clock().now());
        for n in 0..15 {
            let _ = HistoryReducer.reduce(
                &mut state,
                StorefrontAction::add_recently_viewed(n.to_string().as_str()),
                &env,
            );
        }

        assert_eq!(state.recently_viewed.len(), 10);
        assert_eq!(ids(&state).first().map(String::as_str), Some("14"));
    }

    #[test]
    fn test_review_refreshes_timestamp() {
        let clock = Arc::new(ManualClock::new(test_clock().now()));
        let env = StorefrontEnvironment::with_clock(clock.clone());
        let mut state = UserState::new(clock.now());

        let _ = HistoryReducer.reduce(&mut state, StorefrontAction::add_recently_viewed("1"), &env);
        clock.advance(Duration::seconds(30));
        let _ = HistoryReducer.reduce(&mut state, StorefrontAction::add_recently_viewed("1"), &env);

        assert_eq!(state.recently_viewed.len(), 1);
        assert_eq!(state.recently_viewed[0].timestamp, clock.now());
    }
}
