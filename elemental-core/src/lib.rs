//! # elemental-core
//!
//! Core traits for Elemental, a namespaced event layer over a host UI
//! runtime's element primitive.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! host runtime adapters that don't need the full `elemental-std`
//! implementation.
//!
//! # Pieces
//!
//! ## Events ([`Event`])
//!
//! The object every listener receives: a type string, an optional payload and
//! the `bubbles`/`cancelable` flags. Namespaced events carry the type
//! `"{TAG}:{bare}"`; bare and native events carry any other string.
//!
//! ## Listeners ([`EventListener`], [`ListenerRef`])
//!
//! Callables and `handle_event` objects, shared through identity-compared
//! handles. [`invoke`] and [`deliver`] run listeners with per-listener
//! failure isolation.
//!
//! ## Host contract ([`EventTarget`], [`ElementRegistry`], [`Query`])
//!
//! What a host runtime must provide: native dispatch and listener
//! registration, a name → constructor registry, and selector queries.
//!
//! ## Naming ([`event_name`], [`Tagged`])
//!
//! The pure mapping from a namespace and a bare type to the namespaced type.
//!
//! # Error Types
//!
//! - [`ElementError`] - Caller-facing errors
//! - [`ListenerError`] - Errors from a single listener invocation

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod listener;
mod naming;
mod target;

// Re-exports
pub use error::{BoxError, ElementError, ListenerError};
pub use event::{Detail, Event, EventInit};
pub use listener::{
    EventListener, IntoListenerResult, ListenerEntry, ListenerOptions, ListenerRef, deliver,
    invoke, report,
};
pub use naming::{SEPARATOR, Tagged, WILDCARD, event_name, in_namespace};
pub use target::{ElementRegistry, EventTarget, Query};
