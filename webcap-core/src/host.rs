//! The seam between the adapter and the environment it runs in.
//!
//! The adapter only ever asks four kinds of questions: "is there an element for this
//! selector", "does this target have a method with this name", "call it", and "is this
//! document property set". Keeping them behind [`Host`] lets the selection logic be shared by
//! the browser backend and exercised without one.

use std::rc::Rc;

use crate::attributes::InvokeOptions;
use crate::error::CapabilityError;

/// Where a method is looked up.
#[derive(Debug)]
pub enum Target<'a, E> {
    /// The element the capability is acquired on.
    Element(&'a E),
    /// The page document.
    Document,
}

impl<E> Clone for Target<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Target<'_, E> {}

/// An event handler shared between every name of one change event.
pub type Handler = Rc<dyn Fn()>;

/// An environment exposing browser capabilities by name.
pub trait Host {
    /// A page element.
    type Element;

    /// A registered event listener. Dropping it must unregister the listener.
    type Listener;

    /// The first element matching `selector`, if any.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Give keyboard focus to `element`.
    fn focus(&self, element: &Self::Element);

    /// Whether `target` has a callable member called `name`.
    fn has_method(&self, target: Target<'_, Self::Element>, name: &str) -> bool;

    /// Call the member `name` of `target`, which [`Host::has_method`] reported as present.
    fn invoke(
        &self,
        target: Target<'_, Self::Element>,
        name: &'static str,
        options: InvokeOptions,
    ) -> Result<(), CapabilityError>;

    /// Whether the document property `name` exists and holds a truthy value.
    fn is_property_set(&self, name: &str) -> bool;

    /// Register `handler` for the document event `event`.
    fn listen(&self, event: &'static str, handler: Handler) -> Self::Listener;
}
