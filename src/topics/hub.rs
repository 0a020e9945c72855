//! # Hub: one bus per typed topic.
//!
//! [`Hub`] hosts an [`EventBus<P>`] for every [`Topic<P>`] in use, so a single
//! handle can carry events with different payload types while each listener is
//! still checked against the payload of the topic it subscribes to.
//!
//! ## Architecture
//! ```text
//! Hub
//!  └─ HashMap<(name, TypeId), EventBus<_>>
//!       ("user.renamed", String) ──► EventBus<String>
//!       ("cart.size",    usize)  ──► EventBus<usize>
//!       ("cart.size",    String) ──► EventBus<String>   (different type → different bus)
//! ```
//!
//! ## Rules
//! - Buses are created lazily on first subscription and share the hub's [`BusConfig`].
//! - `emit` on a topic nobody subscribed to is `Ok(())` and creates nothing.
//! - The hub lock is released before listeners run; listeners may use the hub.
//!
//! ## Example
//! ```rust
//! use evbus::{Hub, Topic};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! const CART_SIZE: Topic<usize> = Topic::new("cart.size");
//!
//! let hub = Hub::new();
//! let last = Arc::new(AtomicUsize::new(0));
//! let l = Arc::clone(&last);
//! hub.on(&CART_SIZE, move |n: &usize| l.store(*n, Ordering::SeqCst));
//!
//! hub.emit(&CART_SIZE, &3).unwrap();
//! assert_eq!(last.load(Ordering::SeqCst), 3);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{BusConfig, EventBus, Subscription};
use crate::error::{EmitError, ListenerError};
use crate::listeners::ListenerRef;
use crate::topics::topic::Topic;

type TopicKey = (&'static str, TypeId);

struct HubInner {
    buses: RwLock<HashMap<TopicKey, Box<dyn Any + Send + Sync>>>,
    config: BusConfig,
}

/// Registry of typed buses.
///
/// Cheap to clone; clones share the same buses.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

impl Hub {
    /// Creates an empty hub with the default bus configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Creates an empty hub whose buses use `config`.
    #[must_use]
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            inner: Arc::new(HubInner {
                buses: RwLock::new(HashMap::new()),
                config,
            }),
        }
    }

    /// Returns the bus of `topic`, creating it if needed.
    pub fn bus<P: 'static>(&self, topic: &Topic<P>) -> EventBus<P> {
        if let Some(bus) = self.existing(topic) {
            return bus;
        }

        let mut buses = self.inner.buses.write();
        buses
            .entry(key_of(topic))
            .or_insert_with(|| Box::new(EventBus::<P>::with_config(self.inner.config.clone())))
            .downcast_ref::<EventBus<P>>()
            .cloned()
            .expect("topic key carries TypeId::of::<P>(), so its bus is an EventBus<P>")
    }

    /// Subscribes `listener` to `topic`.
    pub fn subscribe<P: 'static>(&self, topic: &Topic<P>, listener: ListenerRef<P>) -> Subscription {
        self.bus(topic).subscribe(topic.name(), listener)
    }

    /// Subscribes a fallible closure to `topic`.
    pub fn subscribe_fn<P, F>(&self, topic: &Topic<P>, f: F) -> Subscription
    where
        P: 'static,
        F: Fn(&P) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.bus(topic).subscribe_fn(topic.name(), f)
    }

    /// Subscribes an infallible closure to `topic`.
    pub fn on<P, F>(&self, topic: &Topic<P>, f: F) -> Subscription
    where
        P: 'static,
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.bus(topic).on(topic.name(), f)
    }

    /// Removes one registration from `topic`.
    pub fn unsubscribe<P: 'static>(&self, topic: &Topic<P>, sub: &Subscription) -> bool {
        self.existing(topic).is_some_and(|bus| bus.unsubscribe(sub))
    }

    /// Emits `payload` to the listeners of `topic`.
    ///
    /// # Errors
    /// Same as [`EventBus::emit`].
    pub fn emit<P: 'static>(&self, topic: &Topic<P>, payload: &P) -> Result<(), EmitError> {
        match self.existing(topic) {
            Some(bus) => bus.emit(topic.name(), payload),
            None => Ok(()),
        }
    }

    /// Number of listeners of `topic`.
    pub fn listener_count<P: 'static>(&self, topic: &Topic<P>) -> usize {
        self.existing(topic)
            .map_or(0, |bus| bus.listener_count(topic.name()))
    }

    /// Number of topics with a bus.
    pub fn topic_count(&self) -> usize {
        self.inner.buses.read().len()
    }

    fn existing<P: 'static>(&self, topic: &Topic<P>) -> Option<EventBus<P>> {
        let buses = self.inner.buses.read();
        buses
            .get(&key_of(topic))
            .and_then(|b| b.downcast_ref::<EventBus<P>>())
            .cloned()
    }
}

fn key_of<P: 'static>(topic: &Topic<P>) -> TopicKey {
    (topic.name(), TypeId::of::<P>())
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&'static str> = self.inner.buses.read().keys().map(|k| k.0).collect();
        names.sort_unstable();
        f.debug_struct("Hub")
            .field("topics", &names)
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerFn;
    use crate::policies::DeliveryPolicy;
    use parking_lot::Mutex;

    const RENAMED: Topic<String> = Topic::new("user.renamed");
    const SIZE: Topic<usize> = Topic::new("cart.size");
    const SIZE_TEXT: Topic<String> = Topic::new("cart.size");

    #[test]
    fn test_emit_unknown_topic_creates_nothing() {
        let hub = Hub::new();
        assert!(hub.emit(&RENAMED, &"x".to_string()).is_ok());
        assert_eq!(hub.topic_count(), 0);
        assert_eq!(hub.listener_count(&RENAMED), 0);
    }

    #[test]
    fn test_same_name_different_payload_is_independent() {
        let hub = Hub::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = Arc::clone(&log);
        hub.on(&SIZE, move |n: &usize| l.lock().push(format!("size={n}")));
        let l = Arc::clone(&log);
        hub.on(&SIZE_TEXT, move |s: &String| l.lock().push(format!("text={s}")));

        hub.emit(&SIZE, &2).unwrap();
        hub.emit(&SIZE_TEXT, &"two".to_string()).unwrap();

        assert_eq!(*log.lock(), vec!["size=2", "text=two"]);
        assert_eq!(hub.topic_count(), 2);
    }

    #[test]
    fn test_bus_handle_is_shared() {
        let hub = Hub::new();
        let bus = hub.bus(&RENAMED);
        let hits = Arc::new(Mutex::new(0));
        let h = Arc::clone(&hits);
        bus.on(RENAMED.name(), move |_: &String| *h.lock() += 1);

        hub.emit(&RENAMED, &"bob".to_string()).unwrap();
        assert_eq!(*hits.lock(), 1);
        assert_eq!(hub.listener_count(&RENAMED), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let hub = Hub::new();
        let listener: ListenerRef<usize> = ListenerFn::arc("noop", |_: &usize| Ok(()));
        let sub = hub.subscribe(&SIZE, listener);

        assert!(!hub.unsubscribe(&RENAMED, &sub));
        assert!(hub.unsubscribe(&SIZE, &sub));
        assert!(!hub.unsubscribe(&SIZE, &sub));
    }

    #[test]
    fn test_bus_is_created_once_per_topic() {
        let hub = Hub::new();
        let first = hub.bus(&SIZE);
        first.on(SIZE.name(), |_: &usize| {});

        assert_eq!(hub.bus(&SIZE).listener_count(SIZE.name()), 1);
        assert_eq!(hub.bus(&SIZE_TEXT).listener_count(SIZE_TEXT.name()), 0);
        assert_eq!(hub.topic_count(), 2);
    }

    #[test]
    fn test_unsubscribe_with_token_of_same_named_topic_is_rejected() {
        let hub = Hub::new();
        let size_sub = hub.on(&SIZE, |_: &usize| {});
        let text_sub = hub.on(&SIZE_TEXT, |_: &String| {});

        assert!(!hub.unsubscribe(&SIZE_TEXT, &size_sub));
        assert!(!hub.unsubscribe(&SIZE, &text_sub));
        assert_eq!(hub.listener_count(&SIZE), 1);
        assert_eq!(hub.listener_count(&SIZE_TEXT), 1);

        assert!(hub.unsubscribe(&SIZE, &size_sub));
        assert_eq!(hub.listener_count(&SIZE_TEXT), 1);
    }

    #[test]
    fn test_buses_inherit_config() {
        let hub = Hub::with_config(BusConfig::with_delivery(DeliveryPolicy::Isolate));
        hub.subscribe_fn(&SIZE, |_: &usize| Err(ListenerError::fail("a")));
        hub.subscribe_fn(&SIZE, |_: &usize| Err(ListenerError::fail("b")));

        let err = hub.emit(&SIZE, &1).unwrap_err();
        assert_eq!(err.failures().len(), 2);
        assert_eq!(hub.bus(&SIZE).config().delivery, DeliveryPolicy::Isolate);
    }

    #[test]
    fn test_listener_may_use_hub() {
        let hub = Hub::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = Arc::clone(&log);
        hub.on(&RENAMED, move |name: &String| l.lock().push(name.clone()));

        let inner = hub.clone();
        hub.on(&SIZE, move |n: &usize| {
            inner.emit(&RENAMED, &format!("n{n}")).unwrap();
        });

        hub.emit(&SIZE, &5).unwrap();
        assert_eq!(*log.lock(), vec!["n5"]);
        assert!(format!("{hub:?}").contains("cart.size"));
    }
}
