//! # Subscription tokens.
//!
//! [`Subscription`] identifies exactly one registration and is returned by every
//! `subscribe*` call. Pass it to [`EventBus::unsubscribe`](crate::EventBus::unsubscribe)
//! to deregister; ignoring it keeps the listener registered for the bus lifetime.
//!
//! [`ScopedSubscription`] is the RAII form: dropping it deregisters.
//!
//! ## Rules
//! - Ids are unique across every bus in the process and never reused, so a
//!   token issued by one bus never matches a registration of another.
//! - Unsubscribing twice is harmless (`false` the second time).
//! - A scoped subscription holds a **weak** reference; it does not keep the bus alive.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};

use crate::core::bus::Shared;

/// Global sequence shared by all buses.
static SUBSCRIPTION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Process-unique identifier of one registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Draws the next id from the process-wide sequence.
    pub(crate) fn next() -> Self {
        Self(SUBSCRIPTION_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Raw numeric value (monotonically increasing across the process).
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque token for one registration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: SubscriptionId,
    event: Arc<str>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, event: &str) -> Self {
        Self {
            id,
            event: Arc::from(event),
        }
    }

    /// Registration id.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Event name the listener was registered under.
    pub fn event(&self) -> &str {
        &self.event
    }
}

/// Registration that is removed when this guard is dropped.
///
/// Created by [`EventBus::subscribe_scoped`](crate::EventBus::subscribe_scoped).
#[must_use = "dropping a ScopedSubscription immediately unsubscribes the listener"]
pub struct ScopedSubscription<P> {
    sub: Subscription,
    bus: Weak<Shared<P>>,
}

impl<P> ScopedSubscription<P> {
    pub(crate) fn new(sub: Subscription, bus: Weak<Shared<P>>) -> Self {
        Self { sub, bus }
    }

    /// The underlying token.
    pub fn subscription(&self) -> &Subscription {
        &self.sub
    }

    /// Deregisters now. Returns `false` if the bus is gone or the
    /// registration was already removed.
    pub fn unsubscribe(mut self) -> bool {
        let bus = std::mem::take(&mut self.bus);
        bus.upgrade().is_some_and(|shared| shared.remove(&self.sub))
    }

    /// Detaches the guard: the listener stays registered and the plain token is returned.
    pub fn into_inner(mut self) -> Subscription {
        self.bus = Weak::new();
        self.sub.clone()
    }
}

impl<P> fmt::Debug for ScopedSubscription<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedSubscription")
            .field("sub", &self.sub)
            .field("attached", &(self.bus.strong_count() > 0))
            .finish()
    }
}

impl<P> Drop for ScopedSubscription<P> {
    fn drop(&mut self) {
        if let Some(shared) = self.bus.upgrade() {
            shared.remove(&self.sub);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_and_never_repeat() {
        let a = SubscriptionId::next();
        let b = SubscriptionId::next();
        assert!(a < b);
        assert_eq!(b.to_string(), format!("#{}", b.as_u64()));
    }
}
