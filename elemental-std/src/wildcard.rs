//! Wildcard listener registry.
//!
//! A [`WildcardSet`] holds the listeners subscribed through a wildcard type
//! rather than a concrete one. Each component owns two: one for its own
//! namespace (`"{TAG}:*"`) and one for every event (`"*"`).

use elemental_core::{Detail, Event, ListenerEntry, ListenerOptions, ListenerRef, deliver};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// An ordered set of listener entries keyed by listener identity.
///
/// # Mutation during a pass
///
/// [`notify`](Self::notify) snapshots the entries before invoking anything.
/// Adds and removes made by a listener take effect from the next pass: a
/// sibling removed mid-pass still runs in the current one, and a listener
/// added mid-pass does not.
pub struct WildcardSet<D: Detail> {
    scope: &'static str,
    entries: Mutex<Vec<ListenerEntry<D>>>,
}

impl<D: Detail> WildcardSet<D> {
    /// Create an empty set. `scope` labels log output.
    pub fn new(scope: &'static str) -> Self {
        Self {
            scope,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Add `listener`.
    ///
    /// Re-adding a listener that is already present is a no-op and keeps the
    /// options of the first registration. Returns `true` if an entry was
    /// added.
    pub fn add(&self, listener: &ListenerRef<D>, options: ListenerOptions) -> bool {
        let mut entries = self.lock();
        if entries.iter().any(|e| e.listener.same(listener)) {
            return false;
        }
        entries.push(ListenerEntry::new(listener.clone(), options));
        true
    }

    /// Remove the entry for `listener`, matched by identity only.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&self, listener: &ListenerRef<D>) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|e| e.listener.same(listener)) {
            Some(pos) => {
                entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether `listener` is registered.
    pub fn contains(&self, listener: &ListenerRef<D>) -> bool {
        self.lock().iter().any(|e| e.listener.same(listener))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Invoke every entry with `event`, in insertion order.
    ///
    /// Failures are logged and skipped. Returns the number of listeners run.
    pub fn notify(&self, event: &Event<D>) -> usize {
        let snapshot = {
            let mut entries = self.lock();
            if entries.is_empty() {
                return 0;
            }
            let snapshot = entries.clone();
            entries.retain(|e| !e.is_once());
            snapshot
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            scope = self.scope,
            event_type = %event.kind(),
            listeners = snapshot.len(),
            "wildcard pass"
        );
        deliver(&snapshot, event, self.scope);
        snapshot.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ListenerEntry<D>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
