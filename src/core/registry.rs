//! # Listener registry: event name → ordered listener slots.
//!
//! ## Architecture
//! ```text
//! HashMap<String, Arc<Vec<Slot>>>
//!   "ping" ──► [ #0 A, #1 B, #4 A ]      (registration order = delivery order)
//!   "save" ──► [ #2 C ]
//!   ""     ──► [ #3 D ]                  (empty name is an ordinary key)
//! ```
//!
//! ## Rules
//! - Slot vectors are copy-on-write: `snapshot` is an `Arc` clone, mutation goes
//!   through `Arc::make_mut`, so an in-flight emit keeps iterating its own copy.
//! - A key whose last slot is removed is dropped; absent and empty are equivalent.
//! - Ids come from the process-wide [`SubscriptionId`] sequence, never reused.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::subscription::SubscriptionId;
use crate::listeners::ListenerRef;

/// One registration.
pub(crate) struct Slot<P> {
    pub(crate) id: SubscriptionId,
    pub(crate) listener: ListenerRef<P>,
}

impl<P> Clone for Slot<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            listener: Arc::clone(&self.listener),
        }
    }
}

/// Listeners of one event name, fixed at the time it was taken.
pub(crate) type Snapshot<P> = Arc<Vec<Slot<P>>>;

pub(crate) struct Registry<P> {
    events: HashMap<String, Snapshot<P>>,
}

impl<P> Registry<P> {
    pub(crate) fn new() -> Self {
        Self {
            events: HashMap::new(),
        }
    }

    /// Appends a listener to `event`, creating the key if absent.
    pub(crate) fn insert(&mut self, event: String, listener: ListenerRef<P>) -> SubscriptionId {
        let id = SubscriptionId::next();

        let slots = self.events.entry(event).or_default();
        Arc::make_mut(slots).push(Slot { id, listener });
        id
    }

    /// Removes one registration. Returns `false` if it is not present.
    pub(crate) fn remove(&mut self, event: &str, id: SubscriptionId) -> bool {
        let Some(slots) = self.events.get_mut(event) else {
            return false;
        };
        let Some(pos) = slots.iter().position(|s| s.id == id) else {
            return false;
        };

        let slots_mut = Arc::make_mut(slots);
        slots_mut.remove(pos);
        if slots_mut.is_empty() {
            self.events.remove(event);
        }
        true
    }

    pub(crate) fn snapshot(&self, event: &str) -> Option<Snapshot<P>> {
        self.events.get(event).map(Arc::clone)
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.events.get(event).map_or(0, |s| s.len())
    }

    /// Event names with at least one listener, sorted.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn total(&self) -> usize {
        self.events.values().map(|s| s.len()).sum()
    }

    /// Drops every listener of `event`; returns how many were removed.
    pub(crate) fn clear_event(&mut self, event: &str) -> usize {
        self.events.remove(event).map_or(0, |s| s.len())
    }

    /// Drops every listener; returns how many were removed.
    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.total();
        self.events.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerFn;

    fn noop() -> ListenerRef<()> {
        ListenerFn::arc("noop", |_: &()| Ok(()))
    }

    #[test]
    fn test_insert_preserves_order_and_unique_ids() {
        let mut reg = Registry::new();
        let a = reg.insert("ping".into(), noop());
        let b = reg.insert("ping".into(), noop());
        let c = reg.insert("pong".into(), noop());

        assert!(a < b && b < c);
        let snap = reg.snapshot("ping").unwrap();
        let ids: Vec<_> = snap.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(reg.total(), 3);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_mutation() {
        let mut reg = Registry::new();
        let a = reg.insert("ping".into(), noop());
        let snap = reg.snapshot("ping").unwrap();

        reg.insert("ping".into(), noop());
        assert!(reg.remove("ping", a));

        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].id, a);
        assert_eq!(reg.count("ping"), 1);
    }

    #[test]
    fn test_remove_last_drops_key() {
        let mut reg = Registry::new();
        let a = reg.insert("ping".into(), noop());
        assert!(reg.remove("ping", a));
        assert!(!reg.remove("ping", a));
        assert!(reg.snapshot("ping").is_none());
        assert!(reg.names().is_empty());
    }

    #[test]
    fn test_remove_wrong_event_is_noop() {
        let mut reg = Registry::new();
        let a = reg.insert("ping".into(), noop());
        assert!(!reg.remove("pong", a));
        assert_eq!(reg.count("ping"), 1);
    }

    #[test]
    fn test_ids_distinct_across_registries() {
        let mut first = Registry::new();
        let mut second = Registry::new();
        let a = first.insert("ping".into(), noop());
        let b = second.insert("ping".into(), noop());

        assert_ne!(a, b);
        assert!(!second.remove("ping", a));
        assert_eq!(second.count("ping"), 1);
    }

    #[test]
    fn test_clear() {
        let mut reg = Registry::new();
        reg.insert("b".into(), noop());
        reg.insert("a".into(), noop());
        reg.insert("a".into(), noop());

        assert_eq!(reg.names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(reg.clear_event("a"), 2);
        assert_eq!(reg.clear_event("a"), 0);
        assert_eq!(reg.clear(), 1);
        assert_eq!(reg.total(), 0);
    }
}
