//! Configuration for acquiring a capability on a page element.

use smol_str::SmolStr;

/// The selector used when none is given: the game renders into the first canvas on the page.
pub const DEFAULT_SELECTOR: &str = "canvas";

/// Attributes used when acquiring pointer lock.
///
/// ```
/// # use webcap_core::AcquireAttributes;
/// let attributes = AcquireAttributes::default()
///     .with_selector("#game")
///     .with_unadjusted_movement(true);
/// assert_eq!(attributes.selector(), "#game");
/// assert!(attributes.focus());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcquireAttributes {
    selector: SmolStr,
    focus: bool,
    unadjusted_movement: bool,
}

impl Default for AcquireAttributes {
    #[inline]
    fn default() -> Self {
        Self {
            selector: SmolStr::new_static(DEFAULT_SELECTOR),
            focus: true,
            unadjusted_movement: false,
        }
    }
}

impl AcquireAttributes {
    /// CSS selector of the element to lock the pointer to.
    ///
    /// The first matching element is used.
    #[inline]
    pub fn with_selector(mut self, selector: impl Into<SmolStr>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Whether to focus the element before requesting the lock, so that it also receives
    /// keyboard input afterwards.
    ///
    /// The default is `true`.
    #[inline]
    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    /// Ask the browser for raw, un-accelerated mouse movement while locked.
    ///
    /// Only honored by browsers supporting options on `requestPointerLock()`, ignored otherwise.
    /// Finding out which kind of browser this is takes a one-time `requestPointerLock()` call on
    /// a detached element. The web backend makes it when these attributes are installed, or on
    /// the first request if the backend is used directly.
    ///
    /// The default is `false`.
    #[inline]
    pub fn with_unadjusted_movement(mut self, unadjusted_movement: bool) -> Self {
        self.unadjusted_movement = unadjusted_movement;
        self
    }

    #[inline]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[inline]
    pub fn focus(&self) -> bool {
        self.focus
    }

    #[inline]
    pub fn unadjusted_movement(&self) -> bool {
        self.unadjusted_movement
    }

    pub(crate) fn selector_owned(&self) -> SmolStr {
        self.selector.clone()
    }
}

/// Options forwarded to the backend along with an acquisition call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InvokeOptions {
    /// Request raw movement. See [`AcquireAttributes::with_unadjusted_movement`].
    pub unadjusted_movement: bool,
}

impl From<&AcquireAttributes> for InvokeOptions {
    fn from(attributes: &AcquireAttributes) -> Self {
        Self { unadjusted_movement: attributes.unadjusted_movement }
    }
}
