//! The event object passed to every listener.

use std::sync::atomic::{AtomicBool, Ordering};

/// A marker trait for event payloads.
///
/// Payloads are opaque to the dispatch layer; they only need to be safe to
/// share with listeners.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid event detail",
    label = "must be `Send + Sync + 'static`",
    note = "Event details are shared with every listener and must be thread-safe and static."
)]
pub trait Detail: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Detail for T {}

/// Construction options for an [`Event`].
///
/// The defaults (`bubbles` and `cancelable` both `true`, no detail) are the
/// ones components use when emitting.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInit<D> {
    /// Whether the event bubbles.
    pub bubbles: bool,
    /// Whether listeners may prevent the default action.
    pub cancelable: bool,
    /// Caller-supplied payload.
    pub detail: Option<D>,
}

impl<D> Default for EventInit<D> {
    fn default() -> Self {
        Self {
            bubbles: true,
            cancelable: true,
            detail: None,
        }
    }
}

impl<D> EventInit<D> {
    /// Options with the emit defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying `detail` with the emit defaults.
    pub fn with_detail(detail: D) -> Self {
        Self {
            detail: Some(detail),
            ..Self::default()
        }
    }

    /// Set the payload.
    pub fn detail(mut self, detail: D) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Override `bubbles`.
    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Override `cancelable`.
    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }
}

/// An event travelling through an element.
///
/// `kind` is the event type string: either `"{TAG}:{bare}"` for namespaced
/// events or any other string for bare and native events.
#[derive(Debug)]
pub struct Event<D = ()> {
    kind: String,
    detail: Option<D>,
    bubbles: bool,
    cancelable: bool,
    default_prevented: AtomicBool,
    immediate_stopped: AtomicBool,
    in_passive: AtomicBool,
}

impl<D> Event<D> {
    /// Create an event of type `kind`.
    pub fn new(kind: impl Into<String>, init: EventInit<D>) -> Self {
        Self {
            kind: kind.into(),
            detail: init.detail,
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            default_prevented: AtomicBool::new(false),
            immediate_stopped: AtomicBool::new(false),
            in_passive: AtomicBool::new(false),
        }
    }

    /// Create a platform-style event: no detail, neither bubbling nor cancelable.
    pub fn bare(kind: impl Into<String>) -> Self {
        Self::new(
            kind,
            EventInit {
                bubbles: false,
                cancelable: false,
                detail: None,
            },
        )
    }

    /// The event type string.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The payload, if one was supplied.
    pub fn detail(&self) -> Option<&D> {
        self.detail.as_ref()
    }

    /// Whether the event bubbles.
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Whether the default action can be prevented.
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Cancel the default action.
    ///
    /// Has no effect on non-cancelable events or when called from a listener
    /// registered as passive.
    pub fn prevent_default(&self) {
        if self.cancelable && !self.in_passive.load(Ordering::Acquire) {
            self.default_prevented.store(true, Ordering::Release);
        }
    }

    /// Whether a listener cancelled the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::Acquire)
    }

    /// Skip the remaining host listeners for this dispatch.
    ///
    /// Wildcard passes still run; they observe all traffic regardless.
    pub fn stop_immediate_propagation(&self) {
        self.immediate_stopped.store(true, Ordering::Release);
    }

    /// Whether [`stop_immediate_propagation`](Self::stop_immediate_propagation) was called.
    pub fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_stopped.load(Ordering::Acquire)
    }

    /// The value `dispatch_event` reports for this event.
    pub fn dispatch_result(&self) -> bool {
        !(self.cancelable && self.default_prevented())
    }

    pub(crate) fn set_passive(&self, passive: bool) -> bool {
        self.in_passive.swap(passive, Ordering::AcqRel)
    }
}
