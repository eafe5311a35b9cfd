//! # Web
//!
//! The browser backend of webcap, for use from WebAssembly compiled with
//! [`wasm-bindgen`][wasm_bindgen].
//!
//! [`WebHost`] connects the lookup-and-select logic of [`webcap_core`] to the page `document`.
//! [`CapabilityAdapter`] bundles it with the acquisition settings and the live change
//! subscriptions, and is what an application usually keeps around. The free functions below
//! are one-shot shortcuts using the default [`AcquireAttributes`].
//!
//! Pointer lock must be requested from inside a user gesture handler (a click or a key press),
//! otherwise browsers refuse it. The refusal arrives asynchronously and is logged.
//!
//! [wasm_bindgen]: https://docs.rs/wasm-bindgen

// Vendor-prefixed members have no `web-sys` bindings. Instead of declaring one extern type per
// prefix, the backend looks members up by name with `Reflect` and calls them as plain
// functions. Only the raw pointer lock path in `lock` uses typed bindings, as it has to inspect
// the standard method's return value.

mod adapter;
mod event_handle;
mod host;
mod lock;

use tracing::warn;
use webcap_core::adapter as core_adapter;
pub use webcap_core::{
    AcquireAttributes, Capability, CapabilityError, CapabilityState, PointerLockState,
    Visibility,
};

pub use self::adapter::{CapabilityAdapter, WebSubscription};
pub use self::event_handle::EventListenerHandle;
pub use self::host::{WebHost, WebListener};

/// Lock the pointer to the first `<canvas>` on the page.
///
/// Logs a warning and does nothing if there is no canvas or the browser has no pointer lock
/// API.
pub fn request_pointer_lock() {
    match WebHost::new() {
        Ok(host) => {
            core_adapter::acquire(&host, Capability::PointerLock, &AcquireAttributes::default())
        },
        Err(error) => warn!("could not acquire {}: {error}", Capability::PointerLock),
    }
}

/// Release the pointer lock, if any.
pub fn exit_pointer_lock() {
    match WebHost::new() {
        Ok(host) => core_adapter::release(&host, Capability::PointerLock),
        Err(error) => warn!("could not release {}: {error}", Capability::PointerLock),
    }
}

/// Dispatch `on_exit()` or `on_acquired()` on every pointer lock change.
///
/// Listens to the standard and all vendor-prefixed change events. Dropping the returned
/// subscription stops it; [`Subscription::detach`](webcap_core::Subscription::detach) keeps it
/// for the rest of the page's lifetime.
pub fn on_pointer_lock_change<M, E, A, D>(
    on_exit: E,
    on_acquired: A,
    dispatch: D,
) -> Result<WebSubscription, CapabilityError>
where
    E: Fn() -> M + 'static,
    A: Fn() -> M + 'static,
    D: Fn(M) + 'static,
{
    let host = WebHost::new()?;
    Ok(core_adapter::subscribe(&host, Capability::PointerLock, on_exit, on_acquired, dispatch))
}

/// Dispatch `on_hidden()` or `on_visible()` on every page visibility change.
pub fn on_visibility_change<M, H, V, D>(
    on_hidden: H,
    on_visible: V,
    dispatch: D,
) -> Result<WebSubscription, CapabilityError>
where
    H: Fn() -> M + 'static,
    V: Fn() -> M + 'static,
    D: Fn(M) + 'static,
{
    let host = WebHost::new()?;
    let subscription =
        core_adapter::subscribe(&host, Capability::PageVisibility, on_hidden, on_visible, dispatch);
    Ok(subscription)
}
