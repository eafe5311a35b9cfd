//! The browser capabilities the adapter knows how to normalize.

use std::fmt;

use crate::candidates::Candidates;
use crate::state::CapabilityState;

/// A logical browser capability that may be exposed under several vendor-prefixed names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// The [Pointer Lock API](https://developer.mozilla.org/en-US/docs/Web/API/Pointer_Lock_API).
    PointerLock,
    /// The [Page Visibility API](https://developer.mozilla.org/en-US/docs/Web/API/Page_Visibility_API).
    PageVisibility,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::PointerLock, Capability::PageVisibility];

    /// Methods on the target element that acquire the capability.
    pub const fn request_methods(self) -> Candidates {
        match self {
            Capability::PointerLock => Candidates::new(&[
                "requestPointerLock",
                "webkitRequestPointerLock",
                "mozRequestPointerLock",
            ]),
            Capability::PageVisibility => Candidates::NONE,
        }
    }

    /// Methods on the document that release the capability.
    pub const fn release_methods(self) -> Candidates {
        match self {
            Capability::PointerLock => Candidates::new(&[
                "exitPointerLock",
                "webkitExitPointerLock",
                "mozExitPointerLock",
            ]),
            Capability::PageVisibility => Candidates::NONE,
        }
    }

    /// Document properties describing the current state.
    pub const fn state_properties(self) -> Candidates {
        match self {
            Capability::PointerLock => Candidates::new(&[
                "pointerLockElement",
                "webkitPointerLockElement",
                "mozPointerLockElement",
            ]),
            Capability::PageVisibility => Candidates::new(&["hidden"]),
        }
    }

    /// Document events fired whenever the state changes.
    ///
    /// A listener has to be registered for every name: browsers only fire the variant they
    /// implement.
    pub const fn change_events(self) -> Candidates {
        match self {
            Capability::PointerLock => Candidates::new(&[
                "pointerlockchange",
                "webkitpointerlockchange",
                "mozpointerlockchange",
            ]),
            Capability::PageVisibility => Candidates::new(&["visibilitychange"]),
        }
    }

    /// Derive the current state from whether any state property is set.
    ///
    /// For pointer lock a set property (a locked element) means active, for visibility a set
    /// property (`document.hidden`) means inactive.
    pub const fn state_from_property(self, is_set: bool) -> CapabilityState {
        let active = match self {
            Capability::PointerLock => is_set,
            Capability::PageVisibility => !is_set,
        };

        if active {
            CapabilityState::Active
        } else {
            CapabilityState::Inactive
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Capability::PointerLock => "pointer lock",
            Capability::PageVisibility => "page visibility",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
