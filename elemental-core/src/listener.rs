//! # Listeners
//!
//! A listener is anything that can receive an [`Event`]. Two shapes are
//! supported and treated identically by every container:
//!
//! - **Callables**: any `Fn(&Event<D>)` returning `()` or `Result<(), E>`.
//! - **Objects**: a type implementing [`EventListener::handle_event`].
//!
//! Listeners are registered through a [`ListenerRef`], whose equality is the
//! identity of the shared allocation. Removal always matches on that identity,
//! never on the listener's behaviour.
//!
//! # Isolation
//!
//! [`invoke`] runs one listener and turns both returned errors and panics
//! into a [`ListenerError`]. [`deliver`] runs a sequence of entries, logging
//! each failure and carrying on with the rest.

use crate::{
    error::{BoxError, ListenerError},
    event::{Detail, Event},
};
use bitflags::bitflags;
use std::{
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

/// Something that can receive events of payload type `D`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `EventListener` for `Event<{D}>`",
    label = "missing `EventListener` implementation",
    note = "Implement `handle_event`, or pass a closure `Fn(&Event<{D}>)`."
)]
pub trait EventListener<D: Detail>: Send + Sync + 'static {
    /// Called once for every event delivered to this listener.
    fn handle_event(&self, event: &Event<D>) -> Result<(), BoxError>;
}

/// Conversion from a callable listener's return value.
///
/// - `()` → success
/// - `Result<(), E>` → success or the boxed error
pub trait IntoListenerResult {
    /// Convert into the listener outcome.
    fn into_listener_result(self) -> Result<(), BoxError>;
}

impl IntoListenerResult for () {
    fn into_listener_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoListenerResult for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_listener_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

impl<D, F, R> EventListener<D> for F
where
    D: Detail,
    F: Fn(&Event<D>) -> R + Send + Sync + 'static,
    R: IntoListenerResult,
{
    fn handle_event(&self, event: &Event<D>) -> Result<(), BoxError> {
        (self)(event).into_listener_result()
    }
}

/// A shared listener handle compared by identity.
///
/// Clones refer to the same listener and compare equal; two handles built
/// from separate (even identical) closures never do.
pub struct ListenerRef<D: Detail> {
    inner: Arc<dyn EventListener<D>>,
}

impl<D: Detail> ListenerRef<D> {
    /// Wrap a listener in a new identity.
    pub fn new<L>(listener: L) -> Self
    where
        L: EventListener<D>,
    {
        Self {
            inner: Arc::new(listener),
        }
    }

    /// Wrap an already shared listener.
    ///
    /// The identity is the `Arc` allocation, so the caller can keep its own
    /// handle to inspect listener state.
    pub fn from_arc<L>(listener: Arc<L>) -> Self
    where
        L: EventListener<D>,
    {
        Self { inner: listener }
    }

    /// Whether both handles refer to the same listener.
    pub fn same(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }

    /// Call the listener directly, without isolation.
    pub fn handle_event(&self, event: &Event<D>) -> Result<(), BoxError> {
        self.inner.handle_event(event)
    }
}

impl<D: Detail> Clone for ListenerRef<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: Detail> PartialEq for ListenerRef<D> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<D: Detail> Eq for ListenerRef<D> {}

impl<D: Detail> fmt::Debug for ListenerRef<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerRef")
            .field(&Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

bitflags! {
    /// Per-subscription options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ListenerOptions: u8 {
        /// Capture-phase listener; part of the host's identity key.
        const CAPTURE = 1;
        /// Remove the listener before its first invocation.
        const ONCE = 1 << 1;
        /// Calls to `prevent_default` from this listener are ignored.
        const PASSIVE = 1 << 2;
    }
}

/// A registered listener with the options it was added with.
pub struct ListenerEntry<D: Detail> {
    /// The listener.
    pub listener: ListenerRef<D>,
    /// The options given at registration.
    pub options: ListenerOptions,
}

impl<D: Detail> Clone for ListenerEntry<D> {
    fn clone(&self) -> Self {
        Self {
            listener: self.listener.clone(),
            options: self.options,
        }
    }
}

impl<D: Detail> fmt::Debug for ListenerEntry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("listener", &self.listener)
            .field("options", &self.options)
            .finish()
    }
}

impl<D: Detail> ListenerEntry<D> {
    /// Create an entry.
    pub fn new(listener: ListenerRef<D>, options: ListenerOptions) -> Self {
        Self { listener, options }
    }

    /// Whether the entry fires at most once.
    pub fn is_once(&self) -> bool {
        self.options.contains(ListenerOptions::ONCE)
    }
}

/// Invoke one listener, isolating its failure.
pub fn invoke<D: Detail>(entry: &ListenerEntry<D>, event: &Event<D>) -> Result<(), ListenerError> {
    let passive = entry.options.contains(ListenerOptions::PASSIVE);
    let previous = event.set_passive(passive);
    let outcome = catch_unwind(AssertUnwindSafe(|| entry.listener.handle_event(event)));
    event.set_passive(previous);

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(ListenerError::Failed(err)),
        Err(payload) => Err(ListenerError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Invoke every entry in order, logging and swallowing failures.
///
/// Returns the number of entries that failed.
pub fn deliver<'a, D, I>(entries: I, event: &Event<D>, scope: &str) -> usize
where
    D: Detail,
    I: IntoIterator<Item = &'a ListenerEntry<D>>,
{
    let mut failed = 0;
    for entry in entries {
        if let Err(err) = invoke(entry, event) {
            report(scope, event, &err);
            failed += 1;
        }
    }
    failed
}

/// Log an isolated listener failure.
pub fn report<D>(scope: &str, event: &Event<D>, err: &ListenerError) {
    #[cfg(feature = "tracing")]
    {
        tracing::warn!(scope, event_type = %event.kind(), error = %err, "listener failed");
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = (scope, event, err);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
