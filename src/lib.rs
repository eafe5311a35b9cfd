//! webcap normalizes browser capabilities that are exposed under several vendor-prefixed names
//! behind a single API.
//!
//! Two capabilities are covered:
//! - [pointer lock][Capability::PointerLock]: hide the cursor and receive raw relative motion,
//!   for mouse-look in games;
//! - [page visibility][Capability::PageVisibility]: know when the tab is hidden, e.g. to pause.
//!
//! # Usage
//!
//! On the Web, keep a [`web::CapabilityAdapter`] around and request the lock from a user
//! gesture handler:
//!
//! ```no_run
//! # #[cfg(target_family = "wasm")]
//! # fn main() -> Result<(), webcap::CapabilityError> {
//! use webcap::web::CapabilityAdapter;
//!
//! enum Msg {
//!     LockExited,
//!     LockAcquired,
//! }
//!
//! let mut adapter = CapabilityAdapter::new()?;
//! adapter.watch_pointer_lock(|| Msg::LockExited, || Msg::LockAcquired, |msg| {
//!     // Hand `msg` to the game's update loop.
//! #   let _ = msg;
//! });
//! adapter.request_pointer_lock();
//! # Ok(())
//! # }
//! # #[cfg(not(target_family = "wasm"))]
//! # fn main() {}
//! ```
//!
//! Every operation re-probes the browser: the first of the candidate names that exists is used,
//! standard name first. If none does, or the target element is missing, a warning is logged
//! through [`tracing`] and the call returns without doing anything. The `try_*` variants
//! return the reason as a [`CapabilityError`] instead.
//!
//! Change listeners are owned by the returned [`Subscription`] and removed when it's dropped.
//!
//! # Other targets
//!
//! The [`adapter`] functions are generic over [`Host`], so the selection logic can be driven by
//! any environment that can answer the same questions a browser document can.
//!
//! [`tracing`]: https://docs.rs/tracing

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use webcap_core::{
    adapter, attributes, candidates, capability, error, host, state, subscription,
    AcquireAttributes, Candidates, Capability, CapabilityError, CapabilityState, Handler, Host,
    InvokeOptions, Operation, PointerLockState, Subscription, Target, Visibility,
};

/// The browser backend.
#[cfg(target_family = "wasm")]
pub mod web {
    pub use webcap_web::*;
}
