//! # Host Runtime Contract
//!
//! The traits a host UI runtime provides and the component layer builds on:
//!
//! - [`EventTarget`]: native dispatch and listener registration
//! - [`ElementRegistry`]: tag name → constructor registration
//! - [`Query`]: selector lookups over a document
//!
//! Components implement [`EventTarget`] themselves, wrapping the host's
//! implementation, so code written against the trait sees wildcard
//! behaviour transparently.

use crate::{
    error::ElementError,
    event::{Detail, Event},
    listener::{ListenerOptions, ListenerRef},
};

/// An object that dispatches events to registered listeners.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot dispatch events of type `Event<{D}>`",
    label = "missing `EventTarget` implementation",
    note = "Implement `EventTarget<{D}>` to act as a host element."
)]
pub trait EventTarget<D: Detail>: Send + Sync {
    /// Dispatch `event` synchronously.
    ///
    /// Returns `false` if the event is cancelable and a listener called
    /// `prevent_default`, otherwise `true`.
    fn dispatch_event(&self, event: &Event<D>) -> bool;

    /// Register `listener` for events of type `kind`.
    fn add_event_listener(&self, kind: &str, listener: &ListenerRef<D>, options: ListenerOptions);

    /// Unregister `listener` from events of type `kind`.
    fn remove_event_listener(
        &self,
        kind: &str,
        listener: &ListenerRef<D>,
        options: ListenerOptions,
    );
}

/// A registry mapping element names to constructors.
pub trait ElementRegistry<C>: Send + Sync {
    /// Whether the runtime behind this registry is present at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Whether `name` already has a constructor.
    fn is_defined(&self, name: &str) -> bool;

    /// Register `constructor` under `name`.
    ///
    /// Fails with [`ElementError::AlreadyDefined`] if the name is taken.
    fn define(&self, name: &str, constructor: C) -> Result<(), ElementError>;

    /// Look up the constructor for `name`.
    fn get(&self, name: &str) -> Option<C>;
}

/// Selector lookups over a tree of nodes.
pub trait Query<N> {
    /// First node matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Result<Option<N>, ElementError>;

    /// Every node matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<N>, ElementError>;

    /// Shorthand for [`query_selector`](Self::query_selector).
    fn qs(&self, selector: &str) -> Result<Option<N>, ElementError> {
        self.query_selector(selector)
    }

    /// Shorthand for [`query_selector_all`](Self::query_selector_all).
    fn qsa(&self, selector: &str) -> Result<Vec<N>, ElementError> {
        self.query_selector_all(selector)
    }
}
