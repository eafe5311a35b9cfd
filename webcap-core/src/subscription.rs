//! Handles to registered change listeners.

use std::fmt;

use crate::Capability;

/// Keeps the change listeners of one capability registered.
///
/// Every event-name variant of the capability gets its own listener, all of them sharing one
/// handler. Dropping the subscription, or calling [`Subscription::cancel`], removes them.
pub struct Subscription<L> {
    capability: Capability,
    listeners: Vec<L>,
}

impl<L> Subscription<L> {
    pub fn new(capability: Capability, listeners: Vec<L>) -> Self {
        Self { capability, listeners }
    }

    #[inline]
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Unregister every listener.
    ///
    /// Calling this more than once does nothing.
    pub fn cancel(&mut self) {
        if !self.listeners.is_empty() {
            tracing::debug!("removing {} {} listener(s)", self.listeners.len(), self.capability);
            self.listeners.clear();
        }
    }

    /// Keep the listeners registered for the rest of the page's lifetime.
    pub fn detach(mut self) {
        std::mem::forget(std::mem::take(&mut self.listeners));
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Number of event names still listened to.
    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<L> fmt::Debug for Subscription<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("capability", &self.capability)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
