//! Testing utilities for Elemental.
//!
//! This module provides listeners that make dispatch behaviour easy to assert on.
//!
//! # Features
//!
//! - [`RecordingListener`]: Records the type and detail of every event it receives
//! - [`CountingListener`]: Counts invocations
//! - [`FailingListener`]: Returns an error or panics on every invocation

use elemental_core::{BoxError, Detail, Event, EventListener, ListenerRef};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Listener
// ============================================================================

struct Recorder<D> {
    events: Mutex<Vec<(String, Option<D>)>>,
}

impl<D: Detail + Clone> EventListener<D> for Recorder<D> {
    fn handle_event(&self, event: &Event<D>) -> Result<(), BoxError> {
        self.lock()
            .push((event.kind().to_string(), event.detail().cloned()));
        Ok(())
    }
}

impl<D> Recorder<D> {
    fn lock(&self) -> MutexGuard<'_, Vec<(String, Option<D>)>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A listener that records every event it receives.
///
/// Clones share the same record and the same listener identity.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::<String>::new();
/// element.add_event_listener("*", &recorder.listener(), ListenerOptions::empty());
///
/// element.emit("ready", EventInit::new())?;
/// assert_eq!(recorder.kinds(), vec!["my-element:ready"]);
/// ```
pub struct RecordingListener<D: Detail + Clone> {
    recorder: Arc<Recorder<D>>,
    handle: ListenerRef<D>,
}

impl<D: Detail + Clone> RecordingListener<D> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        let recorder = Arc::new(Recorder {
            events: Mutex::new(Vec::new()),
        });
        Self {
            handle: ListenerRef::from_arc(recorder.clone()),
            recorder,
        }
    }

    /// The listener handle to register. Always the same identity.
    pub fn listener(&self) -> ListenerRef<D> {
        self.handle.clone()
    }

    /// Types of the recorded events, in arrival order.
    pub fn kinds(&self) -> Vec<String> {
        self.recorder.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Details of the recorded events, in arrival order.
    pub fn details(&self) -> Vec<Option<D>> {
        self.recorder.lock().iter().map(|(_, d)| d.clone()).collect()
    }

    /// Number of recorded events.
    pub fn count(&self) -> usize {
        self.recorder.lock().len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.recorder.lock().clear();
    }
}

impl<D: Detail + Clone> Default for RecordingListener<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Detail + Clone> Clone for RecordingListener<D> {
    fn clone(&self) -> Self {
        Self {
            recorder: self.recorder.clone(),
            handle: self.handle.clone(),
        }
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// A listener that counts invocations.
///
/// Clones share the counter but each call to [`listener`](Self::listener)
/// returns the same identity.
pub struct CountingListener<D: Detail> {
    count: Arc<AtomicUsize>,
    handle: ListenerRef<D>,
}

impl<D: Detail> CountingListener<D> {
    /// Create a counter at zero.
    pub fn new() -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        Self {
            handle: ListenerRef::new(move |_: &Event<D>| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            count,
        }
    }

    /// The listener handle to register.
    pub fn listener(&self) -> ListenerRef<D> {
        self.handle.clone()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<D: Detail> Default for CountingListener<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Detail> Clone for CountingListener<D> {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            handle: self.handle.clone(),
        }
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that fails on every invocation.
#[derive(Debug, Clone)]
pub enum FailingListener {
    /// Return an error with this message.
    Error(String),
    /// Panic with this message.
    Panic(String),
}

impl FailingListener {
    /// A listener returning an error.
    pub fn error(message: impl Into<String>) -> Self {
        FailingListener::Error(message.into())
    }

    /// A listener that panics.
    pub fn panic(message: impl Into<String>) -> Self {
        FailingListener::Panic(message.into())
    }
}

impl<D: Detail> EventListener<D> for FailingListener {
    fn handle_event(&self, _event: &Event<D>) -> Result<(), BoxError> {
        match self {
            FailingListener::Error(message) => Err(message.clone().into()),
            FailingListener::Panic(message) => panic!("{message}"),
        }
    }
}
