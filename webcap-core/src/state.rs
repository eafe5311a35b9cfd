//! Two-valued capability states.
//!
//! States are never stored by the adapter. Each one is derived from a fresh query of the
//! browser at the moment it is needed.

/// The normalized state of any [`Capability`][crate::Capability].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapabilityState {
    /// The pointer is locked, or the page is visible.
    Active,
    /// The pointer is free, or the page is hidden.
    Inactive,
}

impl CapabilityState {
    #[inline]
    pub fn is_active(self) -> bool {
        self == CapabilityState::Active
    }

    /// Pick the value matching this state.
    #[inline]
    pub fn select<T>(self, inactive: T, active: T) -> T {
        match self {
            CapabilityState::Active => active,
            CapabilityState::Inactive => inactive,
        }
    }
}

/// Whether the pointer is currently locked to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerLockState {
    Locked,
    Unlocked,
}

impl From<CapabilityState> for PointerLockState {
    fn from(state: CapabilityState) -> Self {
        state.select(PointerLockState::Unlocked, PointerLockState::Locked)
    }
}

impl From<PointerLockState> for CapabilityState {
    fn from(state: PointerLockState) -> Self {
        match state {
            PointerLockState::Locked => CapabilityState::Active,
            PointerLockState::Unlocked => CapabilityState::Inactive,
        }
    }
}

/// Whether the page is currently visible to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Visible,
    Hidden,
}

impl From<CapabilityState> for Visibility {
    fn from(state: CapabilityState) -> Self {
        state.select(Visibility::Hidden, Visibility::Visible)
    }
}

impl From<Visibility> for CapabilityState {
    fn from(state: Visibility) -> Self {
        match state {
            Visibility::Visible => CapabilityState::Active,
            Visibility::Hidden => CapabilityState::Inactive,
        }
    }
}
