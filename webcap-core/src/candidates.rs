//! Ordered lists of names under which a capability may be exposed.

use std::fmt;
use std::slice;

/// An ordered list of names for one capability entry point.
///
/// The standard name comes first and vendor-prefixed fallbacks after it. The list is fixed at
/// compile time and resolved from scratch every time it is used; nothing is cached.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidates {
    names: &'static [&'static str],
}

impl Candidates {
    /// A list that never resolves.
    pub const NONE: Candidates = Candidates::new(&[]);

    /// Create a list from names in priority order.
    #[inline]
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// The name tried first. This is the standardized one.
    #[inline]
    pub fn standard(&self) -> Option<&'static str> {
        self.names.first().copied()
    }

    #[inline]
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'static, &'static str> {
        self.names.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the first name for which `probe` answers `true`.
    ///
    /// Probing stops at the first hit, so later candidates are never looked at once an earlier
    /// one is available.
    pub fn resolve<F>(&self, mut probe: F) -> Option<&'static str>
    where
        F: FnMut(&'static str) -> bool,
    {
        self.names.iter().copied().find(|&name| probe(name))
    }
}

impl fmt::Debug for Candidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names).finish()
    }
}

impl IntoIterator for Candidates {
    type IntoIter = std::iter::Copied<slice::Iter<'static, &'static str>>;
    type Item = &'static str;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter().copied()
    }
}
