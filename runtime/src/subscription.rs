//! Listener registry and subscription handles.
//!
//! Listeners are notified with a snapshot of the registry taken when the
//! notification round starts, so a listener that unsubscribes another one
//! mid-round does not disturb the iteration.

use crate::metrics::StoreMetrics;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Listener<S> = Box<dyn FnMut(&S)>;

pub(crate) struct ListenerRegistry<S> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    // listeners taken out of `listeners` for the current round
    checked_out: Vec<SubscriptionId>,
    // unsubscribed while their listener was checked out for notification
    cancelled: Vec<SubscriptionId>,
}

impl<S> ListenerRegistry<S> {
    pub(crate) const fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
            checked_out: Vec::new(),
            cancelled: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, listener: Listener<S>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        if let Some(index) = self.listeners.iter().position(|(existing, _)| *existing == id) {
            drop(self.listeners.remove(index));
            return true;
        }

        if self.checked_out.contains(&id) && !self.cancelled.contains(&id) {
            self.cancelled.push(id);
            return true;
        }

        false
    }

    pub(crate) fn len(&self) -> usize {
        (self.listeners.len() + self.checked_out.len()).saturating_sub(self.cancelled.len())
    }

    /// Calls every listener with `state`
    pub(crate) fn notify(registry: &Rc<RefCell<Self>>, state: &S) {
        let mut active = {
            let mut registry = registry.borrow_mut();
            let active = std::mem::take(&mut registry.listeners);
            registry.checked_out = active.iter().map(|(id, _)| *id).collect();
            active
        };

        for (_, listener) in &mut active {
            listener(state);
        }

        let mut registry = registry.borrow_mut();
        registry.checked_out.clear();
        let cancelled = std::mem::take(&mut registry.cancelled);
        active.retain(|(id, _)| !cancelled.contains(id));
        active.append(&mut registry.listeners);
        registry.listeners = active;
    }
}

/// Handle returned by `Store::subscribe`
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
pub struct Subscription<S> {
    id: SubscriptionId,
    registry: Weak<RefCell<ListenerRegistry<S>>>,
}

impl<S> Subscription<S> {
    pub(crate) const fn new(id: SubscriptionId, registry: Weak<RefCell<ListenerRegistry<S>>>) -> Self {
        Self { id, registry }
    }

    /// Identifier of the listener
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener
    ///
    /// Returns `false` if it was already removed or the store is gone.
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };

        let mut registry = registry.borrow_mut();
        let removed = registry.remove(self.id);
        if removed {
            StoreMetrics::record_subscribers(registry.len());
            tracing::debug!(subscription = %self.id, "Listener unsubscribed");
        }
        removed
    }
}

impl<S> std::fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_listener_can_unsubscribe_itself_mid_round() {
        let registry = Rc::new(RefCell::new(ListenerRegistry::<u32>::new()));
        let handle: Rc<RefCell<Option<Subscription<u32>>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let inner_handle = Rc::clone(&handle);
        let inner_calls = Rc::clone(&calls);
        let id = registry.borrow_mut().insert(Box::new(move |_: &u32| {
            inner_calls.set(inner_calls.get() + 1);
            if let Some(subscription) = inner_handle.borrow().as_ref() {
                subscription.unsubscribe();
            }
        }));
        *handle.borrow_mut() = Some(Subscription::new(id, Rc::downgrade(&registry)));

        ListenerRegistry::notify(&registry, &1);
        ListenerRegistry::notify(&registry, &2);

        assert_eq!(calls.get(), 1);
        assert_eq!(registry.borrow().len(), 0);
    }

    #[test]
    fn test_unsubscribe_twice_mid_round() {
        let registry = Rc::new(RefCell::new(ListenerRegistry::<u32>::new()));
        let other_id = registry.borrow_mut().insert(Box::new(|_: &u32| {}));
        let other = Subscription::new(other_id, Rc::downgrade(&registry));
        assert!(other.unsubscribe());

        let results = Rc::new(RefCell::new(Vec::new()));
        let inner_results = Rc::clone(&results);
        registry.borrow_mut().insert(Box::new(move |_: &u32| {
            inner_results.borrow_mut().push(other.unsubscribe());
        }));

        ListenerRegistry::notify(&registry, &1);

        assert_eq!(*results.borrow(), vec![false]);
        assert_eq!(registry.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribing_another_listener_mid_round() {
        let registry = Rc::new(RefCell::new(ListenerRegistry::<u32>::new()));
        let calls = Rc::new(Cell::new(0));

        let second_calls = Rc::clone(&calls);
        let second_id = registry.borrow_mut().insert(Box::new(move |_: &u32| {
            second_calls.set(second_calls.get() + 1);
        }));
        let second = Subscription::new(second_id, Rc::downgrade(&registry));

        let results = Rc::new(RefCell::new(Vec::new()));
        let inner_results = Rc::clone(&results);
        registry.borrow_mut().insert(Box::new(move |_: &u32| {
            inner_results.borrow_mut().push(second.unsubscribe());
        }));

        ListenerRegistry::notify(&registry, &1);
        ListenerRegistry::notify(&registry, &2);

        assert_eq!(*results.borrow(), vec![true, false]);
        assert_eq!(calls.get(), 1);
        assert_eq!(registry.borrow().len(), 1);
    }

    #[test]
    fn test_count_reported_after_unsubscribe_mid_round() {
        let registry = Rc::new(RefCell::new(ListenerRegistry::<u32>::new()));
        let first_id = registry.borrow_mut().insert(Box::new(|_: &u32| {}));
        let first = Subscription::new(first_id, Rc::downgrade(&registry));
        registry.borrow_mut().insert(Box::new(|_: &u32| {}));

        let counts = Rc::new(RefCell::new(Vec::new()));
        let inner_counts = Rc::clone(&counts);
        let inner_registry = Rc::downgrade(&registry);
        registry.borrow_mut().insert(Box::new(move |_: &u32| {
            first.unsubscribe();
            if let Some(registry) = inner_registry.upgrade() {
                inner_counts.borrow_mut().push(registry.borrow().len());
            }
        }));

        ListenerRegistry::notify(&registry, &1);

        assert_eq!(*counts.borrow(), vec![2]);
        assert_eq!(registry.borrow().len(), 2);
    }

    #[test]
    fn test_unsubscribe_twice() {
        let registry = Rc::new(RefCell::new(ListenerRegistry::<u32>::new()));
        let id = registry.borrow_mut().insert(Box::new(|_: &u32| {}));
        let subscription = Subscription::new(id, Rc::downgrade(&registry));

        assert!(subscription.unsubscribe());
        assert!(!subscription.unsubscribe());
    }

    #[test]
    fn test_unsubscribe_after_store_dropped() {
        let registry = Rc::new(RefCell::new(ListenerRegistry::<u32>::new()));
        let id = registry.borrow_mut().insert(Box::new(|_: &u32| {}));
        let subscription = Subscription::new(id, Rc::downgrade(&registry));

        drop(registry);
        assert!(!subscription.unsubscribe());
    }
}
