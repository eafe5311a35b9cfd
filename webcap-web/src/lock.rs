use std::cell::OnceCell;

use js_sys::{Function, Object, Promise};
use tracing::error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, DomException, Element, Navigator};

/// Whether `requestPointerLock()` accepts options, and so can deliver raw, un-accelerated
/// movement.
pub(crate) fn is_cursor_lock_raw(navigator: &Navigator, document: &Document) -> bool {
    thread_local! {
        static IS_CURSOR_LOCK_RAW: OnceCell<bool> = const { OnceCell::new() };
    }

    IS_CURSOR_LOCK_RAW.with(|cell| {
        *cell.get_or_init(|| {
            // Chrome on Linux advertises the option but ignores it.
            // See <https://issues.chromium.org/issues/40833850>.
            if chrome_linux(navigator) {
                return false;
            }

            let Ok(element) = document.create_element("div") else {
                return false;
            };
            let element: &ElementExt = element.unchecked_ref();
            if !element.has_request_pointer_lock().is_function() {
                return false;
            }

            // Only the promise-returning version supports options. Locking a detached element
            // always fails, so the rejection is swallowed.
            let promise = element.request_pointer_lock();
            if promise.is_undefined() {
                false
            } else {
                thread_local! {
                    static REJECT_HANDLER: Closure<dyn FnMut(JsValue)> = Closure::new(|_| ());
                }

                let promise: Promise = promise.unchecked_into();
                let _ = REJECT_HANDLER.with(|handler| promise.catch(handler));
                true
            }
        })
    })
}

/// Call `requestPointerLock` (already resolved on `element`), asking for unadjusted movement.
pub(crate) fn request_pointer_lock_raw(
    function: &Function,
    element: &Element,
) -> Result<JsValue, JsValue> {
    let options: PointerLockOptions = Object::new().unchecked_into();
    options.set_unadjusted_movement(true);
    function.call1(element, &options)
}

/// Log a failed lock request instead of leaving the promise rejection unhandled.
pub(crate) fn catch_rejection(result: &JsValue) {
    thread_local! {
        static REJECT_HANDLER: Closure<dyn FnMut(JsValue)> = Closure::new(|error: JsValue| {
            if let Some(error) = error.dyn_ref::<DomException>() {
                error!("Failed to lock pointer. {}: {}", error.name(), error.message());
            } else {
                console::error_1(&error);
                error!("Failed to lock pointer");
            }
        });
    }

    if let Some(promise) = result.dyn_ref::<Promise>() {
        let _ = REJECT_HANDLER.with(|handler| promise.catch(handler));
    }
}

fn chrome_linux(navigator: &Navigator) -> bool {
    let Ok(user_agent) = navigator.user_agent() else {
        return false;
    };

    user_agent.contains("Linux")
        && user_agent.contains("Chrome/")
        && !user_agent.contains("Android")
        && !user_agent.contains("Firefox/")
}

#[wasm_bindgen]
extern "C" {
    type ElementExt;

    #[wasm_bindgen(method, getter, js_name = requestPointerLock)]
    fn has_request_pointer_lock(this: &ElementExt) -> JsValue;

    #[wasm_bindgen(method, js_name = requestPointerLock)]
    fn request_pointer_lock(this: &ElementExt) -> JsValue;

    type PointerLockOptions;

    #[wasm_bindgen(method, setter, js_name = unadjustedMovement)]
    fn set_unadjusted_movement(this: &PointerLockOptions, value: bool);
}
