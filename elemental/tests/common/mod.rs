#![allow(dead_code)]

use elemental::{
    BoxError, Component, ComponentDescriptor, Event, EventListener, ListenerRef,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Components
// ============================================================================

pub const TEST_TAG: &str = "test-component";

pub fn test_component() -> Component<String> {
    Component::new(ComponentDescriptor::create(TEST_TAG).unwrap())
}

// ============================================================================
// Test Listeners
// ============================================================================

/// Pushes every event type it sees onto a shared log.
pub fn type_logger(log: &Arc<Mutex<Vec<String>>>) -> ListenerRef<String> {
    let log = log.clone();
    ListenerRef::new(move |event: &Event<String>| {
        log.lock().unwrap().push(event.kind().to_string());
    })
}

/// A `handle_event` object counting invocations and remembering the last detail.
#[derive(Default)]
pub struct DetailTracker {
    pub calls: AtomicUsize,
    pub last_detail: Mutex<Option<String>>,
}

impl EventListener<String> for DetailTracker {
    fn handle_event(&self, event: &Event<String>) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_detail.lock().unwrap() = event.detail().cloned();
        Ok(())
    }
}

impl DetailTracker {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
