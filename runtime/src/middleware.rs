//! Middleware observing dispatched actions.
//!
//! A middleware sees each action by shared reference before the reducer
//! runs. It cannot change the action and cannot stop it from reaching the
//! reducer; the signature leaves no room for either.

use storefront_core::action::Action;

/// Observer in front of the reducer
///
/// # Example
///
/// ```ignore
/// struct CountingMiddleware(std::cell::Cell<usize>);
///
/// impl<A> Middleware<A> for CountingMiddleware {
///     fn on_dispatch(&self, _action: &A) {
///         self.0.set(self.0.get() + 1);
///     }
/// }
/// ```
pub trait Middleware<A> {
    /// Called once per action, including actions fed back by effects
    fn on_dispatch(&self, action: &A);
}

/// Logs every action at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl<A> Middleware<A> for LoggingMiddleware
where
    A: Action + std::fmt::Debug,
{
    fn on_dispatch(&self, action: &A) {
        tracing::debug!(action_type = action.action_type(), ?action, "Action dispatched");
    }
}
