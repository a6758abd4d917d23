//! Derive and attribute macros.
#![cfg(feature = "macros")]

use elemental::{
    BoxError, Component as Element, ComponentDescriptor, Event, EventInit, EventTarget,
    ListenerOptions, ListenerRef, Tagged,
};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(elemental::Component)]
#[component(tag = "macro-widget")]
struct MacroWidget;

static SEEN: AtomicUsize = AtomicUsize::new(0);
static CALLS: AtomicUsize = AtomicUsize::new(0);

#[elemental::listener]
fn count_seen(event: &Event<String>) {
    assert!(event.kind().starts_with("macro-widget:"));
    SEEN.fetch_add(1, Ordering::SeqCst);
}

#[elemental::listener]
fn reject_empty(event: &Event<String>) -> Result<(), BoxError> {
    CALLS.fetch_add(1, Ordering::SeqCst);
    match event.detail() {
        Some(_) => Ok(()),
        None => Err("missing detail".into()),
    }
}

#[test]
fn test_derive_binds_tag() {
    assert_eq!(MacroWidget::TAG, "macro-widget");
    assert_eq!(MacroWidget::event("open"), "macro-widget:open");

    let descriptor = ComponentDescriptor::<()>::tagged::<MacroWidget>()
        .build()
        .unwrap();
    assert_eq!(descriptor.name(), MacroWidget::TAG);
}

#[test]
fn test_listener_macro_registers() {
    let descriptor = ComponentDescriptor::<String>::tagged::<MacroWidget>()
        .build()
        .unwrap();
    let el = Element::new(descriptor);

    el.add_event_listener(
        &MacroWidget::event("*"),
        &ListenerRef::new(count_seen),
        ListenerOptions::empty(),
    );
    el.add_event_listener(
        &MacroWidget::event("open"),
        &ListenerRef::new(reject_empty),
        ListenerOptions::empty(),
    );

    el.emit("open", EventInit::new()).unwrap();
    el.emit("open", EventInit::with_detail("x".to_string()))
        .unwrap();

    assert_eq!(SEEN.load(Ordering::SeqCst), 2);
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}
