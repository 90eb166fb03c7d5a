//! Change listeners with scope-bound lifetimes.
//!
//! A listener stays registered exactly as long as its [`Subscription`] is
//! alive. Dropping the editor drops the registry, which releases every
//! callback at once.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::reconcile::Reconciliation;

type Callback = Box<dyn FnMut(&Reconciliation)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: Vec<(u64, Callback)>,
    // Subscriptions dropped while their callback was detached for notification.
    detached: Vec<u64>,
}

/// Callback registry owned by an editor.
#[derive(Default)]
pub(crate) struct Listeners {
    registry: Rc<RefCell<Registry>>,
}

impl Listeners {
    pub(crate) fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&Reconciliation) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Box::new(callback)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().callbacks.len()
    }

    /// Releases every callback. Callbacks are dropped after the registry
    /// borrow ends, so subscriptions they own can unregister themselves.
    pub(crate) fn clear(&self) {
        let released = {
            let mut registry = self.registry.borrow_mut();
            std::mem::take(&mut registry.callbacks)
        };
        drop(released);
        self.registry.borrow_mut().detached.clear();
    }

    /// Calls every callback with `event`.
    ///
    /// Callbacks are taken out of the registry while they run, so a callback
    /// may subscribe or drop subscriptions without a borrow conflict.
    pub(crate) fn notify(&self, event: &Reconciliation) {
        let mut callbacks = std::mem::take(&mut self.registry.borrow_mut().callbacks);
        for (_, callback) in callbacks.iter_mut() {
            callback(event);
        }

        // Dropping a released callback may drop subscriptions it owns,
        // which detaches more ids.
        loop {
            let detached = std::mem::take(&mut self.registry.borrow_mut().detached);
            if detached.is_empty() {
                break;
            }
            let (released, kept): (Vec<_>, Vec<_>) = callbacks
                .into_iter()
                .partition(|(id, _)| detached.contains(id));
            callbacks = kept;
            drop(released);
        }

        let mut registry = self.registry.borrow_mut();
        let added = std::mem::take(&mut registry.callbacks);
        callbacks.extend(added);
        registry.callbacks = callbacks;
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

/// Handle of a registered change listener.
///
/// The listener is removed when the handle is dropped.
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Removes the listener now instead of at end of scope.
    pub fn unsubscribe(self) {}

    /// `true` while the editor that issued this subscription is alive.
    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let released = {
            let Ok(mut registry) = registry.try_borrow_mut() else {
                return;
            };
            match registry.callbacks.iter().position(|(id, _)| *id == self.id) {
                Some(position) => Some(registry.callbacks.remove(position)),
                None => {
                    registry.detached.push(self.id);
                    None
                }
            }
        };
        // outside the borrow: the callback may own further subscriptions
        drop(released);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
