use js_sys::{Function, Reflect};
use tracing::debug;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DomException, Element, HtmlElement, Navigator};
use webcap_core::{CapabilityError, Handler, Host, InvokeOptions, Target};

use crate::event_handle::EventListenerHandle;
use crate::lock;

/// A listener registered by [`WebHost`].
pub type WebListener = EventListenerHandle<dyn FnMut()>;

/// [`Host`] backed by the page's `document`.
///
/// Members are looked up by name at call time with `Reflect`, so vendor-prefixed APIs that
/// `web-sys` has no bindings for are reachable too.
#[derive(Debug, Clone)]
pub struct WebHost {
    navigator: Navigator,
    document: Document,
}

impl WebHost {
    /// Fails outside of a window context, e.g. in a worker.
    pub fn new() -> Result<Self, CapabilityError> {
        let window = web_sys::window().ok_or(CapabilityError::NoDocument)?;
        let document = window.document().ok_or(CapabilityError::NoDocument)?;
        Ok(Self { navigator: window.navigator(), document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether pointer lock can deliver raw, un-accelerated movement in this browser.
    ///
    /// The first call per thread finds out by calling `requestPointerLock()` on a detached
    /// element. The result is cached.
    pub fn is_cursor_lock_raw(&self) -> bool {
        lock::is_cursor_lock_raw(&self.navigator, &self.document)
    }

    fn object<'a>(&'a self, target: Target<'a, Element>) -> &'a JsValue {
        match target {
            Target::Element(element) => element,
            Target::Document => &self.document,
        }
    }
}

impl Host for WebHost {
    type Element = Element;
    type Listener = WebListener;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(element) => element,
            Err(error) => {
                debug!("invalid selector `{selector}`: {}", describe(&error));
                None
            },
        }
    }

    fn focus(&self, element: &Element) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            if let Err(error) = element.focus() {
                debug!("failed to focus element: {}", describe(&error));
            }
        }
    }

    fn has_method(&self, target: Target<'_, Element>, name: &str) -> bool {
        Reflect::get(self.object(target), &JsValue::from_str(name))
            .map(|member| member.is_function())
            .unwrap_or(false)
    }

    fn invoke(
        &self,
        target: Target<'_, Element>,
        name: &'static str,
        options: InvokeOptions,
    ) -> Result<(), CapabilityError> {
        let rejected =
            |error: JsValue| CapabilityError::Rejected { method: name, message: describe(&error) };

        let this = self.object(target);
        let function: Function = Reflect::get(this, &JsValue::from_str(name))
            .map_err(rejected)?
            .dyn_into()
            .map_err(rejected)?;

        let raw = options.unadjusted_movement && self.is_cursor_lock_raw();
        let result = match target {
            Target::Element(element) if raw => lock::request_pointer_lock_raw(&function, element),
            _ => function.call0(this),
        }
        .map_err(rejected)?;

        lock::catch_rejection(&result);
        Ok(())
    }

    fn is_property_set(&self, name: &str) -> bool {
        Reflect::get(&self.document, &JsValue::from_str(name))
            .map(|value| value.is_truthy())
            .unwrap_or(false)
    }

    fn listen(&self, event: &'static str, handler: Handler) -> WebListener {
        let closure: Closure<dyn FnMut()> = Closure::new(move || handler());
        EventListenerHandle::new(self.document.clone(), event, closure)
    }
}

fn describe(error: &JsValue) -> String {
    if let Some(error) = error.dyn_ref::<DomException>() {
        format!("{}: {}", error.name(), error.message())
    } else if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        String::from(error.message())
    } else {
        format!("{error:?}")
    }
}
