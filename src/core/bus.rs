//! # Event bus: named-event subscription and synchronous emission.
//!
//! [`EventBus`] maps event names to ordered listener lists and invokes them
//! synchronously on `emit`.
//!
//! ## Architecture
//! ```text
//! subscribe("ping", A) ─┐                     ┌──────────────────────────────┐
//! subscribe("ping", B) ─┼─► write lock ──────►│ Registry                     │
//! unsubscribe(&sub)    ─┘   (append/remove)   │  "ping" → Arc[A, B]          │
//!                                             └──────────────┬───────────────┘
//! emit("ping", &42) ──► read lock ──► Arc clone (snapshot) ──┘ lock released
//!                           │
//!                           └──► A.on_event(&42) ──► B.on_event(&42)   (caller's thread, in order)
//! ```
//!
//! ## Rules
//! - **FIFO**: listeners of one event run in registration order.
//! - **Snapshot-on-emit**: the listener set is fixed when `emit` starts; listeners
//!   added or removed during that call take effect from the next `emit`.
//! - **No listeners is not an error**: `emit` returns `Ok(())`.
//! - **No dedup**: the same listener registered twice runs twice.
//! - **Re-entrancy**: the lock is never held while listeners run, so listeners may
//!   subscribe, unsubscribe or emit on the same bus.
//! - **Failures** follow [`DeliveryPolicy`]: fail-fast (default) or isolate.
//!
//! ## Example
//! ```rust
//! use evbus::EventBus;
//! use std::sync::{Arc, Mutex};
//!
//! let bus: EventBus<i32> = EventBus::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let s = Arc::clone(&seen);
//! bus.on("ping", move |v: &i32| s.lock().unwrap().push(format!("A({v})")));
//! let s = Arc::clone(&seen);
//! bus.on("ping", move |v: &i32| s.lock().unwrap().push(format!("B({v})")));
//!
//! bus.emit("ping", &42).unwrap();
//! bus.emit("pong", &1).unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["A(42)", "B(42)"]);
//! ```

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::core::config::BusConfig;
use crate::core::registry::{Registry, Snapshot};
use crate::core::subscription::{ScopedSubscription, Subscription};
use crate::error::{EmitError, ListenerError, ListenerFailure};
use crate::listeners::{ListenerFn, ListenerRef, Relay};
use crate::policies::DeliveryPolicy;

/// State shared by every clone of one bus.
pub(crate) struct Shared<P> {
    registry: RwLock<Registry<P>>,
    config: BusConfig,
}

impl<P> Shared<P> {
    pub(crate) fn remove(&self, sub: &Subscription) -> bool {
        let removed = self.registry.write().remove(sub.event(), sub.id());
        if removed {
            debug!(event = sub.event(), id = %sub.id(), "listener unsubscribed");
        }
        removed
    }
}

/// In-process event bus with payload type `P`.
///
/// ### Properties
/// - **Synchronous**: `emit()` returns after every listener ran (or the first failed).
/// - **Cloneable**: clones are handles to the same registry; separate
///   [`EventBus::new`] calls give independent buses.
/// - **Typed**: every listener of this bus receives `&P`. Use a [`Hub`](crate::Hub)
///   for several payload types.
pub struct EventBus<P> {
    shared: Arc<Shared<P>>,
}

impl<P: 'static> EventBus<P> {
    /// Creates an empty bus with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Creates an empty bus with the given configuration.
    #[must_use]
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: RwLock::new(Registry::new()),
                config,
            }),
        }
    }

    /// Configuration this bus was created with.
    pub fn config(&self) -> &BusConfig {
        &self.shared.config
    }

    /// Appends `listener` to the listeners of `event`.
    ///
    /// Any string is a valid name, including `""`. Always succeeds.
    /// The returned token may be ignored if the listener should live as long as the bus.
    pub fn subscribe(&self, event: impl Into<String>, listener: ListenerRef<P>) -> Subscription {
        let event = event.into();
        let sub = {
            let mut registry = self.shared.registry.write();
            let id = registry.insert(event.clone(), Arc::clone(&listener));
            Subscription::new(id, &event)
        };
        debug!(event = %event, id = %sub.id(), listener = listener.name(), "listener subscribed");
        sub
    }

    /// Subscribes a fallible closure.
    ///
    /// The listener is named after the closure type; use [`ListenerFn::arc`] with
    /// [`EventBus::subscribe`] for a readable name.
    pub fn subscribe_fn<F>(&self, event: impl Into<String>, f: F) -> Subscription
    where
        F: Fn(&P) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.subscribe(event, ListenerFn::arc(std::any::type_name::<F>(), f))
    }

    /// Subscribes an infallible closure.
    pub fn on<F>(&self, event: impl Into<String>, f: F) -> Subscription
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        let listener = ListenerFn::arc(std::any::type_name::<F>(), move |payload: &P| {
            f(payload);
            Ok::<(), ListenerError>(())
        });
        self.subscribe(event, listener)
    }

    /// Subscribes `listener` and returns a guard that unsubscribes on drop.
    pub fn subscribe_scoped(
        &self,
        event: impl Into<String>,
        listener: ListenerRef<P>,
    ) -> ScopedSubscription<P> {
        let sub = self.subscribe(event, listener);
        ScopedSubscription::new(sub, Arc::downgrade(&self.shared))
    }

    /// Removes exactly the registration identified by `sub`.
    ///
    /// Returns `false` if it was already removed or was issued by another bus
    /// (ids are unique process-wide). Does not affect an emit already in progress.
    pub fn unsubscribe(&self, sub: &Subscription) -> bool {
        self.shared.remove(sub)
    }

    /// Invokes every listener currently registered for `event` with `payload`.
    ///
    /// ### Notes
    /// - Listeners run on the calling thread, in registration order.
    /// - The listener set is the one registered when this call started.
    /// - Unknown events are a no-op returning `Ok(())`.
    ///
    /// # Errors
    /// - [`EmitError::Listener`] under [`DeliveryPolicy::FailFast`]: the first
    ///   listener returning `Err`; later listeners were not invoked.
    /// - [`EmitError::Isolated`] under [`DeliveryPolicy::Isolate`]: every failure,
    ///   after all listeners were invoked.
    ///
    /// # Panics
    /// Under [`DeliveryPolicy::FailFast`] a panicking listener unwinds through
    /// this call. The bus stays usable afterwards.
    pub fn emit(&self, event: &str, payload: &P) -> Result<(), EmitError> {
        let snapshot = self.shared.registry.read().snapshot(event);
        let Some(slots) = snapshot else {
            trace!(event, "emit without listeners");
            return Ok(());
        };

        match self.shared.config.delivery {
            DeliveryPolicy::FailFast => deliver_fail_fast(event, &slots, payload),
            DeliveryPolicy::Isolate => deliver_isolated(event, &slots, payload),
        }
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.shared.registry.read().count(event)
    }

    /// True if at least one listener is registered for `event`.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Names of events with at least one listener, sorted.
    pub fn event_names(&self) -> Vec<String> {
        self.shared.registry.read().names()
    }

    /// Total number of registrations across all events.
    pub fn len(&self) -> usize {
        self.shared.registry.read().total()
    }

    /// True if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every listener of `event`. Returns how many were removed.
    pub fn clear_event(&self, event: &str) -> usize {
        let removed = self.shared.registry.write().clear_event(event);
        debug!(event, removed, "event cleared");
        removed
    }

    /// Removes every listener of every event. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let removed = self.shared.registry.write().clear();
        debug!(removed, "bus cleared");
        removed
    }
}

impl<P: Clone + Send + 'static> EventBus<P> {
    /// Forwards every payload of `event` into a new broadcast channel.
    ///
    /// Uses [`BusConfig::relay_capacity`]. Unsubscribe the returned token to stop relaying.
    pub fn relay(&self, event: impl Into<String>) -> (Subscription, broadcast::Receiver<P>) {
        self.relay_with_capacity(event, self.shared.config.relay_capacity_clamped())
    }

    /// Like [`EventBus::relay`] with an explicit capacity (min 1).
    pub fn relay_with_capacity(
        &self,
        event: impl Into<String>,
        capacity: usize,
    ) -> (Subscription, broadcast::Receiver<P>) {
        let relay = Relay::new(capacity);
        let rx = relay.subscribe();
        let sub = self.subscribe(event, Arc::new(relay));
        (sub, rx)
    }
}

fn deliver_fail_fast<P: 'static>(
    event: &str,
    slots: &Snapshot<P>,
    payload: &P,
) -> Result<(), EmitError> {
    for (index, slot) in slots.iter().enumerate() {
        if let Err(source) = slot.listener.on_event(payload) {
            return Err(EmitError::Listener {
                event: event.to_string(),
                listener: slot.listener.name().to_string(),
                index,
                source,
            });
        }
    }
    Ok(())
}

fn deliver_isolated<P: 'static>(
    event: &str,
    slots: &Snapshot<P>,
    payload: &P,
) -> Result<(), EmitError> {
    let mut failures = Vec::new();

    for (index, slot) in slots.iter().enumerate() {
        let outcome = catch_unwind(AssertUnwindSafe(|| slot.listener.on_event(payload)));
        let error = match outcome {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => e,
            Err(panic) => ListenerError::from_panic(panic),
        };

        warn!(
            event,
            listener = slot.listener.name(),
            index,
            label = error.as_label(),
            error = %error.as_message(),
            "listener failed; continuing delivery"
        );
        failures.push(ListenerFailure {
            index,
            listener: slot.listener.name().to_string(),
            error,
        });
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(EmitError::Isolated {
            event: event.to_string(),
            failures,
        })
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.shared.registry.read();
        f.debug_struct("EventBus")
            .field("events", &registry.names())
            .field("listeners", &registry.total())
            .field("config", &self.shared.config)
            .finish()
    }
}
