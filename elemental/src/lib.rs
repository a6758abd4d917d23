//! # elemental - Namespaced Events for Component Elements
//!
//! `elemental` layers namespaced event dispatch and wildcard subscription on
//! top of a host runtime's element primitive. A component is given a name
//! (its TAG), and every event it emits is prefixed with `TAG:` so component
//! types sharing a page never collide.
//!
//! ## Quick Start
//!
//! ```rust
//! use elemental::prelude::*;
//!
//! let descriptor = ComponentDescriptor::<String>::create("my-element").unwrap();
//! let element = Component::new(descriptor);
//!
//! // One specific namespaced event
//! let on_ready = ListenerRef::new(|event: &Event<String>| {
//!     assert_eq!(event.detail().map(String::as_str), Some("now"));
//! });
//! element.add_event_listener(&element.event("ready"), &on_ready, ListenerOptions::empty());
//!
//! // Everything in the namespace, and everything at all
//! let in_namespace = ListenerRef::new(|_: &Event<String>| {});
//! let everything = ListenerRef::new(|_: &Event<String>| {});
//! element.add_event_listener(&element.event("*"), &in_namespace, ListenerOptions::empty());
//! element.add_event_listener("*", &everything, ListenerOptions::empty());
//!
//! element.emit("ready", EventInit::with_detail("now".to_string())).unwrap();
//! element.dispatch("plain", EventInit::new());
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use elemental_core::{
    // Error types
    BoxError,
    // Event
    Detail,
    ElementError,
    // Host contract
    ElementRegistry,
    Event,
    EventInit,
    // Listener
    EventListener,
    EventTarget,
    IntoListenerResult,
    ListenerEntry,
    ListenerError,
    ListenerOptions,
    ListenerRef,
    Query,
    // Naming
    SEPARATOR,
    Tagged,
    WILDCARD,
    deliver,
    event_name,
    in_namespace,
    invoke,
};

// Components
pub use elemental_std::component::{
    AttributeChange, AttributeHandler, Component, ComponentBuilder, ComponentDescriptor, RenderFn,
    ServerRenderFn, validate_name,
};

// Wildcard registry
pub use elemental_std::wildcard::WildcardSet;

// In-memory host runtime
pub use elemental_std::{
    document::Document,
    native::{MemoryRegistry, NativeTarget},
};

/// String rendering helpers.
pub mod html {
    pub use elemental_std::attributes::{AttrValue, to_attributes};
    pub use elemental_std::html::{
        HtmlValue, RenderItem, Template, escape, html, render_components, render_to_string,
        spread, wrap_in_container,
    };
}

/// Standard listener implementations.
pub mod listeners {
    pub use elemental_std::logging::LoggingListener;
}

/// Testing utilities.
pub mod testing {
    pub use elemental_std::testing::{CountingListener, FailingListener, RecordingListener};
}

/// Prelude module - common imports for Elemental.
///
/// # Usage
///
/// ```rust,ignore
/// use elemental::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Component, ComponentDescriptor, ElementError, ElementRegistry, Event, EventInit,
        EventListener, EventTarget, ListenerOptions, ListenerRef, Query, Tagged, WILDCARD,
    };
}

#[cfg(feature = "macros")]
pub use elemental_macros::{Component, listener};
