use std::fmt;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

/// An event listener that stays registered until dropped.
pub struct EventListenerHandle<T: ?Sized> {
    target: EventTarget,
    event_type: &'static str,
    listener: Closure<T>,
}

impl<T: ?Sized> EventListenerHandle<T> {
    pub(crate) fn new<U>(target: U, event_type: &'static str, listener: Closure<T>) -> Self
    where
        U: Into<EventTarget>,
    {
        let target = target.into();
        if let Err(error) =
            target.add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
        {
            web_sys::console::error_2(
                &format!("Error adding event listener {event_type}").into(),
                &error,
            );
        }
        EventListenerHandle { target, event_type, listener }
    }

    pub fn event_type(&self) -> &'static str {
        self.event_type
    }
}

impl<T: ?Sized> fmt::Debug for EventListenerHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListenerHandle").field("event_type", &self.event_type).finish()
    }
}

impl<T: ?Sized> Drop for EventListenerHandle<T> {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(
                self.event_type,
                self.listener.as_ref().unchecked_ref(),
            )
            .unwrap_or_else(|e| {
                web_sys::console::error_2(
                    &format!("Error removing event listener {}", self.event_type).into(),
                    &e,
                )
            });
    }
}
