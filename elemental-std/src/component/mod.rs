//! # Components
//!
//! A [`Component`] wraps a host element and adds two things on top of the
//! host's own dispatch:
//!
//! - **Namespaced emission**: [`Component::emit`] prefixes the bare type with
//!   the component's TAG, so `emit("change")` on a `color-picker` dispatches
//!   `color-picker:change`.
//! - **Wildcard subscription**: subscribing to `"{TAG}:*"` observes every
//!   emitted event in the namespace; subscribing to `"*"` observes every event
//!   the component dispatches, whatever its type or origin.
//!
//! # Ordering
//!
//! For a single dispatch: host listeners run first, in their registration
//! order; then the global (`"*"`) pass; then, for events produced by
//! [`Component::emit`] only, the namespaced (`"{TAG}:*"`) pass. Each pass runs
//! in subscription order and isolates listener failures.
//!
//! # Example
//!
//! ```rust
//! use elemental_std::component::{Component, ComponentDescriptor};
//! use elemental_core::{Event, EventInit, EventTarget, ListenerOptions, ListenerRef};
//!
//! let descriptor = ComponentDescriptor::<String>::create("my-element").unwrap();
//! let element = Component::new(descriptor);
//!
//! let listener = ListenerRef::new(|event: &Event<String>| {
//!     assert_eq!(event.kind(), "my-element:ready");
//! });
//! element.add_event_listener(&element.event("*"), &listener, ListenerOptions::empty());
//! element.emit("ready", EventInit::with_detail("now".to_string())).unwrap();
//! ```

mod descriptor;

pub use descriptor::{
    AttributeHandler, ComponentBuilder, ComponentDescriptor, RenderFn, ServerRenderFn,
    validate_name,
};

use crate::{html::Template, native::NativeTarget, wildcard::WildcardSet};
use elemental_core::{
    Detail, ElementError, Event, EventInit, EventTarget, ListenerOptions, ListenerRef, WILDCARD,
    in_namespace,
};
use std::{
    collections::BTreeMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// A change to an observed attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    /// The attribute name.
    pub name: String,
    /// The value before the change, if the attribute was present.
    pub old: Option<String>,
    /// The value after the change, if the attribute is still present.
    pub new: Option<String>,
}

/// A component instance bound to a host element.
pub struct Component<D: Detail = (), T: EventTarget<D> = NativeTarget<D>> {
    descriptor: ComponentDescriptor<D, T>,
    host: T,
    namespace_wildcard: String,
    namespaced: WildcardSet<D>,
    global: WildcardSet<D>,
    attributes: Mutex<BTreeMap<String, String>>,
    inner_html: Mutex<Template>,
}

impl<D: Detail, T: EventTarget<D> + Default> Component<D, T> {
    /// Create an instance on a fresh host element.
    pub fn new(descriptor: ComponentDescriptor<D, T>) -> Self {
        Self::with_host(descriptor, T::default())
    }
}

impl<D: Detail, T: EventTarget<D>> Component<D, T> {
    /// Create an instance on `host` and render it.
    pub fn with_host(descriptor: ComponentDescriptor<D, T>, host: T) -> Self {
        let component = Self {
            namespace_wildcard: descriptor.namespace_wildcard(),
            descriptor,
            host,
            namespaced: WildcardSet::new("namespaced"),
            global: WildcardSet::new("global"),
            attributes: Mutex::new(BTreeMap::new()),
            inner_html: Mutex::new(Template::default()),
        };
        component.rerender();
        component
    }

    /// The component namespace.
    pub fn tag(&self) -> &str {
        self.descriptor.name()
    }

    /// The type this instance was created from.
    pub fn descriptor(&self) -> &ComponentDescriptor<D, T> {
        &self.descriptor
    }

    /// The wrapped host element.
    ///
    /// Dispatching through the host directly skips both wildcard passes; go
    /// through the component's own [`EventTarget`] impl to reach them.
    pub fn host(&self) -> &T {
        &self.host
    }

    /// Namespaced event type for `bare`.
    pub fn event(&self, bare: &str) -> String {
        self.descriptor.event(bare)
    }

    /// Dispatch the namespaced event `"{TAG}:{bare}"`.
    ///
    /// After the host dispatch (and the global wildcard pass it triggers),
    /// the namespaced wildcard listeners are notified. Returns `false` if the
    /// event was cancelable and a host or global listener prevented its
    /// default.
    ///
    /// # Errors
    ///
    /// [`ElementError::InvalidArgument`] if `bare` is the wildcard token.
    /// Nothing is dispatched in that case.
    pub fn emit(&self, bare: &str, init: EventInit<D>) -> Result<bool, ElementError> {
        if bare == WILDCARD {
            return Err(ElementError::InvalidArgument(format!(
                "`{WILDCARD}` is reserved for subscriptions and cannot be emitted"
            )));
        }

        let event = Event::new(self.event(bare), init);
        #[cfg(feature = "tracing")]
        tracing::trace!(tag = %self.tag(), event_type = %event.kind(), "emit");

        let result = self.dispatch_event(&event);
        if in_namespace(event.kind(), self.tag()) {
            self.namespaced.notify(&event);
        }
        Ok(result)
    }

    /// Dispatch an event of type `kind` without namespacing.
    ///
    /// Global wildcard listeners see it; namespaced wildcard listeners don't.
    pub fn dispatch(&self, kind: &str, init: EventInit<D>) -> bool {
        let event = Event::new(kind, init);
        #[cfg(feature = "tracing")]
        tracing::trace!(tag = %self.tag(), event_type = %event.kind(), "dispatch");
        self.dispatch_event(&event)
    }

    /// Number of `"{TAG}:*"` subscribers.
    pub fn namespaced_listener_count(&self) -> usize {
        self.namespaced.len()
    }

    /// Number of `"*"` subscribers.
    pub fn global_listener_count(&self) -> usize {
        self.global.len()
    }

    /// Value of attribute `name`.
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.lock_attributes().get(name).cloned()
    }

    /// Whether attribute `name` is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.lock_attributes().contains_key(name)
    }

    /// Set attribute `name`, notifying its handler if it is observed.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let old = self
            .lock_attributes()
            .insert(name.to_string(), value.clone());
        self.attribute_changed(name, old, Some(value));
    }

    /// Remove attribute `name`, notifying its handler if it was present and
    /// is observed.
    pub fn remove_attribute(&self, name: &str) {
        let old = self.lock_attributes().remove(name);
        if old.is_some() {
            self.attribute_changed(name, old, None);
        }
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<String> {
        self.get_attribute("id")
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.lock_attributes()
            .get("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Render with the descriptor's render function, without storing.
    pub fn render(&self) -> Template {
        self.descriptor.render(self)
    }

    /// Render and store the result as the inner markup.
    pub fn rerender(&self) {
        let markup = self.render();
        *self
            .inner_html
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = markup;
    }

    /// The last rendered inner markup.
    pub fn inner_html(&self) -> Template {
        self.inner_html
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn attribute_changed(&self, name: &str, old: Option<String>, new: Option<String>) {
        let Some(handler) = self.descriptor.attribute_handler(name) else {
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(tag = %self.tag(), attribute = name, "attribute changed");
        let change = AttributeChange {
            name: name.to_string(),
            old,
            new,
        };
        handler(self, &change);
    }

    fn lock_attributes(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<D: Detail, T: EventTarget<D>> EventTarget<D> for Component<D, T> {
    /// Host dispatch, then the global wildcard pass.
    ///
    /// This runs for every event through the component: emitted, bare, or
    /// constructed and dispatched directly.
    fn dispatch_event(&self, event: &Event<D>) -> bool {
        let result = self.host.dispatch_event(event);
        self.global.notify(event);
        result
    }

    /// Routes `"{TAG}:*"` and `"*"` to the wildcard sets; any other type goes
    /// to the host unchanged.
    fn add_event_listener(&self, kind: &str, listener: &ListenerRef<D>, options: ListenerOptions) {
        if kind == self.namespace_wildcard {
            self.namespaced.add(listener, options);
        } else if kind == WILDCARD {
            self.global.add(listener, options);
        } else {
            self.host.add_event_listener(kind, listener, options);
        }
    }

    fn remove_event_listener(
        &self,
        kind: &str,
        listener: &ListenerRef<D>,
        options: ListenerOptions,
    ) {
        if kind == self.namespace_wildcard {
            self.namespaced.remove(listener);
        } else if kind == WILDCARD {
            self.global.remove(listener);
        } else {
            self.host.remove_event_listener(kind, listener, options);
        }
    }
}

impl<D: Detail, T: EventTarget<D>> fmt::Debug for Component<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("tag", &self.tag())
            .field("attributes", &*self.lock_attributes())
            .field("namespaced", &self.namespaced.len())
            .field("global", &self.global.len())
            .finish()
    }
}
