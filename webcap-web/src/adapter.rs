use std::fmt;

use tracing::debug;
use webcap_core::adapter;
use webcap_core::{
    AcquireAttributes, Capability, CapabilityError, PointerLockState, Subscription, Visibility,
};

use crate::host::{WebHost, WebListener};

/// A subscription to change events registered on the page document.
pub type WebSubscription = Subscription<WebListener>;

/// Pointer lock and page visibility for one page.
///
/// Holds at most one change subscription per capability. Watching a capability again replaces
/// the earlier subscription instead of registering a second set of listeners.
pub struct CapabilityAdapter {
    host: WebHost,
    attributes: AcquireAttributes,
    pointer_lock: Option<WebSubscription>,
    visibility: Option<WebSubscription>,
}

impl CapabilityAdapter {
    pub fn new() -> Result<Self, CapabilityError> {
        Self::with_attributes(AcquireAttributes::default())
    }

    /// With [`AcquireAttributes::with_unadjusted_movement`] set, this also runs the one-time
    /// raw pointer lock detection, so that later requests invoke a single method.
    pub fn with_attributes(attributes: AcquireAttributes) -> Result<Self, CapabilityError> {
        let host = WebHost::new()?;
        detect_raw(&host, &attributes);
        Ok(Self { host, attributes, pointer_lock: None, visibility: None })
    }

    pub fn host(&self) -> &WebHost {
        &self.host
    }

    pub fn attributes(&self) -> &AcquireAttributes {
        &self.attributes
    }

    /// Used by later calls to [`CapabilityAdapter::request_pointer_lock`].
    pub fn set_attributes(&mut self, attributes: AcquireAttributes) {
        detect_raw(&self.host, &attributes);
        self.attributes = attributes;
    }

    /// Lock the pointer to the configured element, logging a warning if that's impossible.
    pub fn request_pointer_lock(&self) {
        adapter::acquire(&self.host, Capability::PointerLock, &self.attributes)
    }

    /// Lock the pointer to the configured element.
    ///
    /// Returns the name of the browser method that was called. The lock itself is granted
    /// asynchronously; watch [`CapabilityAdapter::watch_pointer_lock`] for the outcome.
    pub fn try_request_pointer_lock(&self) -> Result<&'static str, CapabilityError> {
        adapter::try_acquire(&self.host, Capability::PointerLock, &self.attributes)
    }

    pub fn exit_pointer_lock(&self) {
        adapter::release(&self.host, Capability::PointerLock)
    }

    pub fn try_exit_pointer_lock(&self) -> Result<&'static str, CapabilityError> {
        adapter::try_release(&self.host, Capability::PointerLock)
    }

    pub fn pointer_lock_state(&self) -> PointerLockState {
        adapter::current_state(&self.host, Capability::PointerLock).into()
    }

    pub fn visibility(&self) -> Visibility {
        adapter::current_state(&self.host, Capability::PageVisibility).into()
    }

    /// See [`WebHost::is_cursor_lock_raw`].
    pub fn is_raw_pointer_lock_supported(&self) -> bool {
        self.host.is_cursor_lock_raw()
    }

    /// Dispatch `on_exit()` or `on_acquired()` whenever the pointer lock state changes.
    pub fn watch_pointer_lock<M, E, A, D>(&mut self, on_exit: E, on_acquired: A, dispatch: D)
    where
        E: Fn() -> M + 'static,
        A: Fn() -> M + 'static,
        D: Fn(M) + 'static,
    {
        self.watch(Capability::PointerLock, on_exit, on_acquired, dispatch)
    }

    /// Dispatch `on_hidden()` or `on_visible()` whenever the page visibility changes.
    pub fn watch_visibility<M, H, V, D>(&mut self, on_hidden: H, on_visible: V, dispatch: D)
    where
        H: Fn() -> M + 'static,
        V: Fn() -> M + 'static,
        D: Fn(M) + 'static,
    {
        self.watch(Capability::PageVisibility, on_hidden, on_visible, dispatch)
    }

    /// Stop dispatching changes of `capability`. Does nothing if it isn't watched.
    pub fn unwatch(&mut self, capability: Capability) {
        if let Some(mut subscription) = self.slot(capability).take() {
            subscription.cancel();
        }
    }

    pub fn is_watching(&self, capability: Capability) -> bool {
        let slot = match capability {
            Capability::PointerLock => &self.pointer_lock,
            Capability::PageVisibility => &self.visibility,
        };
        slot.as_ref().is_some_and(Subscription::is_active)
    }

    fn watch<M, I, A, D>(
        &mut self,
        capability: Capability,
        on_inactive: I,
        on_active: A,
        dispatch: D,
    )
    where
        I: Fn() -> M + 'static,
        A: Fn() -> M + 'static,
        D: Fn(M) + 'static,
    {
        if self.slot(capability).take().is_some() {
            debug!("replacing existing {capability} subscription");
        }

        let subscription =
            adapter::subscribe(&self.host, capability, on_inactive, on_active, dispatch);
        *self.slot(capability) = Some(subscription);
    }

    fn slot(&mut self, capability: Capability) -> &mut Option<WebSubscription> {
        match capability {
            Capability::PointerLock => &mut self.pointer_lock,
            Capability::PageVisibility => &mut self.visibility,
        }
    }
}

fn detect_raw(host: &WebHost, attributes: &AcquireAttributes) {
    if attributes.unadjusted_movement() {
        let raw = host.is_cursor_lock_raw();
        debug!("raw pointer lock supported: {raw}");
    }
}

impl fmt::Debug for CapabilityAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityAdapter")
            .field("attributes", &self.attributes)
            .field("pointer_lock", &self.pointer_lock)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}
