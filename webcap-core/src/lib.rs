//! Base types for cross-vendor browser capability adapters.
//!
//! A browser capability such as pointer lock may be exposed under several names: the
//! standardized one and a number of vendor-prefixed predecessors. This crate holds the
//! platform-independent part of normalizing them: the fixed candidate tables for every
//! [`Capability`], the lookup-and-select logic in [`adapter`], and the [`Host`] trait a backend
//! implements to connect it to an actual browser.
//!
//! Most users want [`webcap`] instead, which also pulls in the Web backend.
//!
//! [`webcap`]: https://docs.rs/webcap

pub mod adapter;
pub mod attributes;
pub mod candidates;
pub mod capability;
pub mod error;
pub mod host;
pub mod state;
pub mod subscription;

pub use self::attributes::{AcquireAttributes, InvokeOptions};
pub use self::candidates::Candidates;
pub use self::capability::Capability;
pub use self::error::{CapabilityError, Operation};
pub use self::host::{Handler, Host, Target};
pub use self::state::{CapabilityState, PointerLockState, Visibility};
pub use self::subscription::Subscription;
