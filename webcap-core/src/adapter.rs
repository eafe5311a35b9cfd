//! Capability selection and change notification, independent of the backend.
//!
//! Every operation probes the capability's candidate names again; nothing is resolved ahead of
//! time or remembered between calls. The `try_*` variants report why an operation could not
//! run; the plain variants log that reason as a warning and return normally.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::attributes::{AcquireAttributes, InvokeOptions};
use crate::error::{CapabilityError, Operation};
use crate::host::{Handler, Host, Target};
use crate::state::CapabilityState;
use crate::subscription::Subscription;
use crate::Capability;

/// Acquire `capability` on the element selected by `attributes`.
///
/// Exactly one method is invoked: the first of [`Capability::request_methods`] the element
/// has. Returns its name.
pub fn try_acquire<H: Host>(
    host: &H,
    capability: Capability,
    attributes: &AcquireAttributes,
) -> Result<&'static str, CapabilityError> {
    let element = host
        .query_selector(attributes.selector())
        .ok_or_else(|| CapabilityError::NoElement { selector: attributes.selector_owned() })?;

    if attributes.focus() {
        host.focus(&element);
    }

    let target = Target::Element(&element);
    let candidates = capability.request_methods();
    let method = candidates
        .resolve(|name| host.has_method(target, name))
        .ok_or(CapabilityError::Unsupported { capability, operation: Operation::Acquire })?;

    // Options are only understood by the unprefixed method.
    let options = if candidates.standard() == Some(method) {
        InvokeOptions::from(attributes)
    } else {
        InvokeOptions::default()
    };

    debug!("requesting {capability} via `{method}`");
    host.invoke(target, method, options)?;
    Ok(method)
}

/// Like [`try_acquire`], but failures are only logged.
pub fn acquire<H: Host>(host: &H, capability: Capability, attributes: &AcquireAttributes) {
    if let Err(error) = try_acquire(host, capability, attributes) {
        warn!("could not acquire {capability}: {error}");
    }
}

/// Release `capability` through the first of [`Capability::release_methods`] the document has.
pub fn try_release<H: Host>(
    host: &H,
    capability: Capability,
) -> Result<&'static str, CapabilityError> {
    let method = capability
        .release_methods()
        .resolve(|name| host.has_method(Target::Document, name))
        .ok_or(CapabilityError::Unsupported { capability, operation: Operation::Release })?;

    debug!("releasing {capability} via `{method}`");
    host.invoke(Target::Document, method, InvokeOptions::default())?;
    Ok(method)
}

/// Like [`try_release`], but failures are only logged.
pub fn release<H: Host>(host: &H, capability: Capability) {
    if let Err(error) = try_release(host, capability) {
        warn!("could not release {capability}: {error}");
    }
}

/// Query the browser for the current state of `capability`.
pub fn current_state<H: Host>(host: &H, capability: Capability) -> CapabilityState {
    let is_set = capability.state_properties().resolve(|name| host.is_property_set(name)).is_some();
    capability.state_from_property(is_set)
}

/// Call `dispatch` with a freshly built value whenever `capability` changes state.
///
/// One handler is registered for every name in [`Capability::change_events`]. On each firing
/// the state is queried again, and exactly one of `on_inactive` and `on_active` builds the
/// value passed to `dispatch`. The event payload is ignored.
pub fn subscribe<H, M, I, A, D>(
    host: &H,
    capability: Capability,
    on_inactive: I,
    on_active: A,
    dispatch: D,
) -> Subscription<H::Listener>
where
    H: Host + Clone + 'static,
    I: Fn() -> M + 'static,
    A: Fn() -> M + 'static,
    D: Fn(M) + 'static,
{
    let handler: Handler = Rc::new({
        let host = host.clone();
        move || {
            let message = match current_state(&host, capability) {
                CapabilityState::Active => on_active(),
                CapabilityState::Inactive => on_inactive(),
            };
            dispatch(message);
        }
    });

    let listeners =
        capability.change_events().into_iter().map(|event| host.listen(event, handler.clone()));
    let subscription = Subscription::new(capability, listeners.collect());
    debug!("listening for {capability} changes on {} event(s)", subscription.len());
    subscription
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Focus(&'static str),
        Element(&'static str, &'static str, InvokeOptions),
        Document(&'static str),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockElement(&'static str);

    #[derive(Default)]
    struct State {
        elements: Vec<&'static str>,
        element_methods: Vec<&'static str>,
        document_methods: Vec<&'static str>,
        properties: RefCell<Vec<&'static str>>,
        reject: Option<&'static str>,
        calls: RefCell<Vec<Call>>,
        listeners: RefCell<Vec<(usize, &'static str, Handler)>>,
        next_id: Cell<usize>,
    }

    #[derive(Clone, Default)]
    struct MockHost(Rc<State>);

    struct MockListener {
        id: usize,
        host: MockHost,
    }

    impl Drop for MockListener {
        fn drop(&mut self) {
            self.host.0.listeners.borrow_mut().retain(|(id, ..)| *id != self.id);
        }
    }

    impl MockHost {
        fn new(build: impl FnOnce(&mut State)) -> Self {
            let mut state = State::default();
            build(&mut state);
            Self(Rc::new(state))
        }

        fn browser() -> Self {
            Self::new(|state| {
                state.elements = vec!["canvas"];
                state.element_methods = vec!["requestPointerLock"];
                state.document_methods = vec!["exitPointerLock"];
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.0.calls.borrow().clone()
        }

        fn set_property(&self, name: &'static str, set: bool) {
            let mut properties = self.0.properties.borrow_mut();
            properties.retain(|property| *property != name);
            if set {
                properties.push(name);
            }
        }

        fn fire(&self, event: &str) {
            let handlers: Vec<Handler> = self
                .0
                .listeners
                .borrow()
                .iter()
                .filter(|(_, name, _)| *name == event)
                .map(|(.., handler)| handler.clone())
                .collect();
            for handler in handlers {
                handler();
            }
        }

        fn listener_count(&self) -> usize {
            self.0.listeners.borrow().len()
        }
    }

    impl Host for MockHost {
        type Element = MockElement;
        type Listener = MockListener;

        fn query_selector(&self, selector: &str) -> Option<MockElement> {
            self.0.elements.iter().find(|element| **element == selector).map(|e| MockElement(*e))
        }

        fn focus(&self, element: &MockElement) {
            self.0.calls.borrow_mut().push(Call::Focus(element.0));
        }

        fn has_method(&self, target: Target<'_, MockElement>, name: &str) -> bool {
            match target {
                Target::Element(_) => self.0.element_methods.iter().any(|method| *method == name),
                Target::Document => self.0.document_methods.iter().any(|method| *method == name),
            }
        }

        fn invoke(
            &self,
            target: Target<'_, MockElement>,
            name: &'static str,
            options: InvokeOptions,
        ) -> Result<(), CapabilityError> {
            let call = match target {
                Target::Element(element) => Call::Element(element.0, name, options),
                Target::Document => Call::Document(name),
            };
            self.0.calls.borrow_mut().push(call);

            match self.0.reject {
                Some(message) => {
                    Err(CapabilityError::Rejected { method: name, message: message.into() })
                },
                None => Ok(()),
            }
        }

        fn is_property_set(&self, name: &str) -> bool {
            self.0.properties.borrow().iter().any(|property| *property == name)
        }

        fn listen(&self, event: &'static str, handler: Handler) -> MockListener {
            let id = self.0.next_id.get();
            self.0.next_id.set(id + 1);
            self.0.listeners.borrow_mut().push((id, event, handler));
            MockListener { id, host: self.clone() }
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Msg {
        Exited,
        Acquired,
    }

    type Received = Rc<RefCell<Vec<Msg>>>;

    fn record(host: &MockHost, capability: Capability) -> (Subscription<MockListener>, Received) {
        let received = Rc::new(RefCell::new(Vec::new()));
        let subscription = subscribe(host, capability, || Msg::Exited, || Msg::Acquired, {
            let received = received.clone();
            move |msg| received.borrow_mut().push(msg)
        });
        (subscription, received)
    }

    #[test]
    fn acquire_without_element_calls_nothing() {
        let host = MockHost::new(|state| state.element_methods = vec!["requestPointerLock"]);

        let logs = capture_logs(|| {
            acquire(&host, Capability::PointerLock, &AcquireAttributes::default());
        });

        assert!(host.calls().is_empty());
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("no element found for selector `canvas`"), "{logs}");
    }

    #[test]
    fn acquire_focuses_then_invokes_standard_method() {
        let host = MockHost::browser();
        let attributes = AcquireAttributes::default().with_unadjusted_movement(true);

        let method = try_acquire(&host, Capability::PointerLock, &attributes).unwrap();

        assert_eq!(method, "requestPointerLock");
        assert_eq!(
            host.calls(),
            [
                Call::Focus("canvas"),
                Call::Element(
                    "canvas",
                    "requestPointerLock",
                    InvokeOptions { unadjusted_movement: true }
                ),
            ]
        );
    }

    #[test]
    fn acquire_invokes_only_first_available_prefix() {
        let host = MockHost::new(|state| {
            state.elements = vec!["canvas"];
            state.element_methods = vec!["mozRequestPointerLock", "webkitRequestPointerLock"];
        });
        let attributes = AcquireAttributes::default().with_unadjusted_movement(true);

        let logs = capture_logs(|| acquire(&host, Capability::PointerLock, &attributes));

        let invoked: Vec<_> =
            host.calls().into_iter().filter(|call| matches!(call, Call::Element(..))).collect();
        assert_eq!(
            invoked,
            [Call::Element("canvas", "webkitRequestPointerLock", InvokeOptions::default())]
        );
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn acquire_without_focus() {
        let host = MockHost::browser();
        let attributes = AcquireAttributes::default().with_focus(false);

        try_acquire(&host, Capability::PointerLock, &attributes).unwrap();

        assert!(!host.calls().iter().any(|call| matches!(call, Call::Focus(_))));
    }

    #[test]
    fn acquire_unsupported() {
        let host = MockHost::new(|state| state.elements = vec!["canvas"]);

        let error = try_acquire(&host, Capability::PointerLock, &AcquireAttributes::default())
            .unwrap_err();

        assert_eq!(error, CapabilityError::Unsupported {
            capability: Capability::PointerLock,
            operation: Operation::Acquire,
        });
        assert_eq!(host.calls(), [Call::Focus("canvas")]);

        let logs = capture_logs(|| {
            acquire(&host, Capability::PointerLock, &AcquireAttributes::default());
        });
        assert!(logs.contains("pointer lock API not supported"), "{logs}");
    }

    #[test]
    fn acquire_custom_selector() {
        let host = MockHost::new(|state| {
            state.elements = vec!["#game"];
            state.element_methods = vec!["requestPointerLock"];
        });

        let missing = try_acquire(&host, Capability::PointerLock, &AcquireAttributes::default());
        assert!(matches!(missing, Err(CapabilityError::NoElement { .. })));

        let attributes = AcquireAttributes::default().with_selector("#game");
        let method = try_acquire(&host, Capability::PointerLock, &attributes);
        assert_eq!(method, Ok("requestPointerLock"));
    }

    #[test]
    fn visibility_cannot_be_acquired() {
        let host = MockHost::browser();
        let error = try_acquire(&host, Capability::PageVisibility, &AcquireAttributes::default());
        assert!(matches!(error, Err(CapabilityError::Unsupported { .. })));
        assert!(!host.calls().iter().any(|call| matches!(call, Call::Element(..))));
    }

    #[test]
    fn rejected_invocation_is_reported() {
        let host = MockHost::new(|state| {
            state.elements = vec!["canvas"];
            state.element_methods = vec!["requestPointerLock"];
            state.reject = Some("WrongDocumentError");
        });

        let result = try_acquire(&host, Capability::PointerLock, &AcquireAttributes::default());
        assert_eq!(
            result,
            Err(CapabilityError::Rejected {
                method: "requestPointerLock",
                message: "WrongDocumentError".into(),
            })
        );

        let logs = capture_logs(|| {
            acquire(&host, Capability::PointerLock, &AcquireAttributes::default());
        });
        assert!(logs.contains("WrongDocumentError"), "{logs}");
    }

    #[test]
    fn release_uses_document_method() {
        let host = MockHost::new(|state| {
            state.document_methods = vec!["webkitExitPointerLock", "mozExitPointerLock"];
        });

        assert_eq!(try_release(&host, Capability::PointerLock), Ok("webkitExitPointerLock"));
        assert_eq!(host.calls(), [Call::Document("webkitExitPointerLock")]);
    }

    #[test]
    fn release_unsupported_logs() {
        let host = MockHost::default();

        let logs = capture_logs(|| release(&host, Capability::PointerLock));

        assert!(host.calls().is_empty());
        assert!(logs.contains("could not release pointer lock"), "{logs}");
    }

    #[test]
    fn state_is_queried_not_cached() {
        let host = MockHost::default();
        assert_eq!(current_state(&host, Capability::PointerLock), CapabilityState::Inactive);

        host.set_property("mozPointerLockElement", true);
        assert_eq!(current_state(&host, Capability::PointerLock), CapabilityState::Active);

        host.set_property("mozPointerLockElement", false);
        assert_eq!(current_state(&host, Capability::PointerLock), CapabilityState::Inactive);
    }

    #[test]
    fn subscribe_listens_on_every_variant() {
        let host = MockHost::default();
        let (subscription, _) = record(&host, Capability::PointerLock);
        assert_eq!(subscription.len(), 3);
        assert_eq!(host.listener_count(), 3);

        let (visibility, _) = record(&host, Capability::PageVisibility);
        assert_eq!(visibility.len(), 1);
        assert_eq!(host.listener_count(), 4);
    }

    #[test]
    fn lock_acquired_fires_once() {
        let host = MockHost::default();
        let (_subscription, received) = record(&host, Capability::PointerLock);

        host.set_property("pointerLockElement", true);
        host.fire("pointerlockchange");

        assert_eq!(*received.borrow(), [Msg::Acquired]);
    }

    #[test]
    fn lock_exit_fires_once() {
        let host = MockHost::default();
        let (_subscription, received) = record(&host, Capability::PointerLock);

        host.set_property("webkitPointerLockElement", true);
        host.fire("webkitpointerlockchange");
        host.set_property("webkitPointerLockElement", false);
        host.fire("webkitpointerlockchange");

        assert_eq!(*received.borrow(), [Msg::Acquired, Msg::Exited]);
    }

    #[test]
    fn state_is_read_when_event_fires() {
        let host = MockHost::default();
        let (_subscription, received) = record(&host, Capability::PointerLock);

        // The state flips back before the event is delivered.
        host.set_property("pointerLockElement", true);
        host.set_property("pointerLockElement", false);
        host.fire("mozpointerlockchange");

        assert_eq!(*received.borrow(), [Msg::Exited]);
    }

    #[test]
    fn visibility_changes() {
        let host = MockHost::default();
        let (_subscription, received) = record(&host, Capability::PageVisibility);

        host.set_property("hidden", true);
        host.fire("visibilitychange");
        host.set_property("hidden", false);
        host.fire("visibilitychange");
        // Unrelated events are ignored.
        host.fire("pointerlockchange");

        // `Exited` is the inactive value, i.e. hidden.
        assert_eq!(*received.borrow(), [Msg::Exited, Msg::Acquired]);
    }

    #[test]
    fn cancelled_subscription_stops_dispatching() {
        let host = MockHost::default();
        let (mut subscription, received) = record(&host, Capability::PointerLock);

        subscription.cancel();
        subscription.cancel();
        host.fire("pointerlockchange");

        assert!(received.borrow().is_empty());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn dropped_subscription_unregisters() {
        let host = MockHost::default();
        let (subscription, received) = record(&host, Capability::PageVisibility);
        drop(subscription);

        host.fire("visibilitychange");

        assert!(received.borrow().is_empty());
        assert_eq!(host.listener_count(), 0);
    }
}
