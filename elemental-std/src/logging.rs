//! Logging listener for event observation.

use elemental_core::{BoxError, Detail, Event, EventListener};
use std::fmt::Debug;

/// A listener that logs every event it receives.
///
/// Attached as a global wildcard subscriber it traces all traffic through a
/// component.
///
/// # Example
///
/// ```rust,ignore
/// use elemental::{ListenerOptions, ListenerRef, listeners::LoggingListener};
///
/// let tap = ListenerRef::new(LoggingListener::named("color-picker"));
/// element.add_event_listener("*", &tap, ListenerOptions::empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingListener {
    name: &'static str,
}

impl LoggingListener {
    /// Create a new `LoggingListener` with a default name.
    pub fn new() -> Self {
        Self { name: "event" }
    }

    /// Create a new `LoggingListener` with a custom name.
    ///
    /// The name is used in log messages to identify the observed element.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> EventListener<D> for LoggingListener
where
    D: Detail + Debug,
{
    fn handle_event(&self, event: &Event<D>) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.name,
                event_type = %event.kind(),
                detail = ?event.detail(),
                default_prevented = event.default_prevented(),
                "observed event"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = event;
        }
        Ok(())
    }
}
