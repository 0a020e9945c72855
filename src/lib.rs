//! # evbus
//!
//! **evbus** is a minimal in-process event bus for Rust.
//!
//! Producers emit a payload under an event name; every listener currently
//! registered for that name is invoked synchronously, in registration order,
//! on the producer's thread. No queues, no background tasks, no persistence.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   Producers                          Consumers
//!  ┌──────────┐                     ┌──────────────────┐
//!  │ widget A │─ emit("save", &p) ─►│ EventBus<P>      │
//!  └──────────┘                     │  registry:       │
//!  ┌──────────┐                     │  "save" → [L1,L2]│──► L1.on_event(&p) ──► L2.on_event(&p)
//!  │ bootstrap│─ subscribe("save",L)│  "quit" → [L3]   │
//!  └──────────┘                     └──────────────────┘
//!                                          │ Relay (optional)
//!                                          ▼
//!                                  tokio::sync::broadcast ──► async tasks
//! ```
//!
//! ### Emission
//! ```text
//! emit(name, &payload)
//!   ├─► take snapshot of listeners for `name` (Arc clone, lock released)
//!   ├─► none? ──► Ok(())
//!   └─► for each listener in registration order:
//!         ├─ Ok  ──► next
//!         └─ Err ──► DeliveryPolicy::FailFast ─► return EmitError::Listener (rest skipped)
//!                    DeliveryPolicy::Isolate  ─► record, continue, return EmitError::Isolated
//! ```
//!
//! ## Features
//! | Area              | Description                                                        | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------------|---------------------------------------------|
//! | **Bus**           | Named-event subscribe/emit with snapshot-on-emit semantics.        | [`EventBus`]                                |
//! | **Listeners**     | Trait and closure adapters for callbacks.                          | [`Listen`], [`ListenerFn`], [`ListenerRef`] |
//! | **Subscriptions** | Tokens for deregistration, RAII guards.                            | [`Subscription`], [`ScopedSubscription`]    |
//! | **Policies**      | Fail-fast or isolate-and-continue on listener failure.             | [`DeliveryPolicy`]                          |
//! | **Topics**        | Compile-time payload typing per event name.                        | [`Topic`], [`Hub`]                          |
//! | **Async bridge**  | Forward emissions into a broadcast channel.                        | [`Relay`]                                   |
//! | **Errors**        | Typed errors for listeners and emission.                           | [`ListenerError`], [`EmitError`]            |
//! | **Configuration** | Per-bus settings.                                                  | [`BusConfig`]                               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogListener` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use evbus::{EventBus, ListenerError, ListenerFn, ListenerRef};
//!
//! let bus: EventBus<String> = EventBus::new();
//!
//! let printer: ListenerRef<String> = ListenerFn::arc("printer", |data: &String| {
//!     println!("EventBus Data Received: {data}");
//!     Ok::<_, ListenerError>(())
//! });
//! let sub = bus.subscribe("eventBusData", printer);
//!
//! bus.emit("eventBusData", &"Data from EventBus".to_string())?;
//!
//! assert!(bus.unsubscribe(&sub));
//! bus.emit("eventBusData", &"nobody listens".to_string())?;
//! # Ok::<(), evbus::EmitError>(())
//! ```
mod core;
mod error;
mod listeners;
mod policies;
mod topics;

// ---- Public re-exports ----

pub use crate::core::{BusConfig, EventBus, ScopedSubscription, Subscription, SubscriptionId};
pub use error::{EmitError, ListenerError, ListenerFailure};
pub use listeners::{Listen, ListenerFn, ListenerRef, Relay};
pub use policies::DeliveryPolicy;
pub use topics::{Hub, Topic};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
