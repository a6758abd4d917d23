//! In-memory native event target.

use elemental_core::{
    Detail, Event, EventTarget, ListenerEntry, ListenerOptions, ListenerRef, invoke, report,
};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

/// One registration. The flag is shared with every dispatch snapshot that
/// holds the slot, so removal is seen even if the same listener is re-added.
struct Slot<D: Detail> {
    entry: ListenerEntry<D>,
    removed: Arc<AtomicBool>,
}

impl<D: Detail> Clone for Slot<D> {
    fn clone(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            removed: Arc::clone(&self.removed),
        }
    }
}

impl<D: Detail> Slot<D> {
    fn new(entry: ListenerEntry<D>) -> Self {
        Self {
            entry,
            removed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn is_removed(&self) -> bool {
        self.removed.load(Ordering::SeqCst)
    }

    fn mark_removed(&self) {
        self.removed.store(true, Ordering::SeqCst);
    }
}

type Slots<D> = HashMap<String, Vec<Slot<D>>>;

/// A host event target keeping per-type listener lists.
///
/// Follows the platform listener rules:
///
/// - `(type, listener, capture)` is the identity key; re-adding is a no-op.
/// - Listeners run in registration order.
/// - A listener removed during a dispatch is not invoked later in that
///   dispatch; one added during a dispatch waits for the next, even if it
///   was removed and re-added.
/// - `ONCE` listeners are removed right before they run.
pub struct NativeTarget<D: Detail> {
    listeners: Mutex<Slots<D>>,
}

impl<D: Detail> Default for NativeTarget<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Detail> NativeTarget<D> {
    /// Create a target with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: &str) -> usize {
        self.lock().get(kind).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, Slots<D>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim `slot` for invocation: `false` if it was removed meanwhile.
    fn claim(&self, kind: &str, slot: &Slot<D>) -> bool {
        let mut map = self.lock();
        if slot.is_removed() {
            return false;
        }
        if slot.entry.is_once() {
            slot.mark_removed();
            if let Some(slots) = map.get_mut(kind) {
                slots.retain(|s| !Arc::ptr_eq(&s.removed, &slot.removed));
                if slots.is_empty() {
                    map.remove(kind);
                }
            }
        }
        true
    }
}

fn same_key<D: Detail>(
    slot: &Slot<D>,
    listener: &ListenerRef<D>,
    options: ListenerOptions,
) -> bool {
    slot.entry.listener.same(listener)
        && slot.entry.options.contains(ListenerOptions::CAPTURE)
            == options.contains(ListenerOptions::CAPTURE)
}

impl<D: Detail> EventTarget<D> for NativeTarget<D> {
    fn dispatch_event(&self, event: &Event<D>) -> bool {
        let snapshot = match self.lock().get(event.kind()) {
            Some(slots) => slots.clone(),
            None => return event.dispatch_result(),
        };

        for slot in &snapshot {
            if event.immediate_propagation_stopped() {
                break;
            }
            if !self.claim(event.kind(), slot) {
                continue;
            }
            if let Err(err) = invoke(&slot.entry, event) {
                report("native", event, &err);
            }
        }

        event.dispatch_result()
    }

    fn add_event_listener(&self, kind: &str, listener: &ListenerRef<D>, options: ListenerOptions) {
        let mut map = self.lock();
        let slots = map.entry(kind.to_string()).or_default();
        if slots.iter().any(|s| same_key(s, listener, options)) {
            return;
        }
        slots.push(Slot::new(ListenerEntry::new(listener.clone(), options)));
    }

    fn remove_event_listener(
        &self,
        kind: &str,
        listener: &ListenerRef<D>,
        options: ListenerOptions,
    ) {
        let mut map = self.lock();
        let Some(slots) = map.get_mut(kind) else {
            return;
        };
        if let Some(pos) = slots.iter().position(|s| same_key(s, listener, options)) {
            slots.remove(pos).mark_removed();
        }
        if slots.is_empty() {
            map.remove(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elemental_core::EventInit;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn counting(count: &Arc<AtomicUsize>) -> ListenerRef<()> {
        let count = count.clone();
        ListenerRef::new(move |_: &Event<()>| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_dispatch_by_type() {
        let target = NativeTarget::new();
        let count = Arc::new(AtomicUsize::new(0));
        target.add_event_listener("click", &counting(&count), ListenerOptions::empty());

        assert!(target.dispatch_event(&Event::bare("click")));
        assert!(target.dispatch_event(&Event::bare("other")));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let target = NativeTarget::new();
        let count = Arc::new(AtomicUsize::new(0));
        let listener = counting(&count);
        target.add_event_listener("click", &listener, ListenerOptions::empty());
        target.add_event_listener("click", &listener, ListenerOptions::PASSIVE);
        target.add_event_listener("click", &listener, ListenerOptions::CAPTURE);
        assert_eq!(target.listener_count("click"), 2);

        target.dispatch_event(&Event::bare("click"));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_remove_matches_capture() {
        let target = NativeTarget::new();
        let count = Arc::new(AtomicUsize::new(0));
        let listener = counting(&count);
        target.add_event_listener("click", &listener, ListenerOptions::CAPTURE);

        target.remove_event_listener("click", &listener, ListenerOptions::empty());
        assert_eq!(target.listener_count("click"), 1);
        target.remove_event_listener("click", &listener, ListenerOptions::CAPTURE);
        assert_eq!(target.listener_count("click"), 0);
    }

    #[test]
    fn test_once_listener_runs_once() {
        let target = NativeTarget::new();
        let count = Arc::new(AtomicUsize::new(0));
        target.add_event_listener("click", &counting(&count), ListenerOptions::ONCE);

        target.dispatch_event(&Event::bare("click"));
        target.dispatch_event(&Event::bare("click"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(target.listener_count("click"), 0);
    }

    #[test]
    fn test_prevent_default_result() {
        let target = NativeTarget::<()>::new();
        let cancel = ListenerRef::new(|e: &Event<()>| e.prevent_default());
        target.add_event_listener("submit", &cancel, ListenerOptions::empty());

        assert!(!target.dispatch_event(&Event::new("submit", EventInit::new())));
        assert!(target.dispatch_event(&Event::new("submit", EventInit::new().cancelable(false))));
    }

    #[test]
    fn test_stop_immediate_propagation() {
        let target = NativeTarget::new();
        let count = Arc::new(AtomicUsize::new(0));
        let stopper = ListenerRef::new(|e: &Event<()>| e.stop_immediate_propagation());
        target.add_event_listener("click", &stopper, ListenerOptions::empty());
        target.add_event_listener("click", &counting(&count), ListenerOptions::empty());

        target.dispatch_event(&Event::bare("click"));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_removed_during_dispatch_is_skipped() {
        let target = Arc::new(NativeTarget::new());
        let count = Arc::new(AtomicUsize::new(0));
        let victim = counting(&count);
        let remover = {
            let target = Arc::downgrade(&target);
            let victim = victim.clone();
            ListenerRef::new(move |_: &Event<()>| {
                if let Some(target) = target.upgrade() {
                    target.remove_event_listener("click", &victim, ListenerOptions::empty());
                }
            })
        };
        target.add_event_listener("click", &remover, ListenerOptions::empty());
        target.add_event_listener("click", &victim, ListenerOptions::empty());

        target.dispatch_event(&Event::bare("click"));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_readded_during_dispatch_waits_for_next() {
        let target = Arc::new(NativeTarget::new());
        let count = Arc::new(AtomicUsize::new(0));
        let victim = counting(&count);
        let juggler = {
            let target = Arc::downgrade(&target);
            let victim = victim.clone();
            ListenerRef::new(move |_: &Event<()>| {
                if let Some(target) = target.upgrade() {
                    target.remove_event_listener("click", &victim, ListenerOptions::empty());
                    target.add_event_listener("click", &victim, ListenerOptions::empty());
                }
            })
        };
        target.add_event_listener("click", &juggler, ListenerOptions::ONCE);
        target.add_event_listener("click", &victim, ListenerOptions::empty());

        target.dispatch_event(&Event::bare("click"));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        target.dispatch_event(&Event::bare("click"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_added_during_dispatch_waits_for_next() {
        let target = Arc::new(NativeTarget::new());
        let count = Arc::new(AtomicUsize::new(0));
        let late = counting(&count);
        let adder = {
            let target = Arc::downgrade(&target);
            let late = late.clone();
            ListenerRef::new(move |_: &Event<()>| {
                if let Some(target) = target.upgrade() {
                    target.add_event_listener("click", &late, ListenerOptions::empty());
                }
            })
        };
        target.add_event_listener("click", &adder, ListenerOptions::empty());

        target.dispatch_event(&Event::bare("click"));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        target.dispatch_event(&Event::bare("click"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_listener_is_isolated() {
        let target = NativeTarget::new();
        let count = Arc::new(AtomicUsize::new(0));
        let failing = ListenerRef::new(|_: &Event<()>| Err::<(), _>("broken"));
        target.add_event_listener("click", &failing, ListenerOptions::empty());
        target.add_event_listener("click", &counting(&count), ListenerOptions::empty());

        assert!(target.dispatch_event(&Event::bare("click")));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
