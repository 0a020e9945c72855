//! Bus core: registry, subscriptions and emission.
//!
//! The public API from this module is [`EventBus`], its configuration and the
//! subscription tokens it hands out.
//!
//! Internal modules:
//! - [`bus`]: subscribe/emit/unsubscribe and delivery under a [`DeliveryPolicy`](crate::DeliveryPolicy);
//! - [`registry`]: event name → copy-on-write listener slots;
//! - [`subscription`]: ids, tokens and scoped guards;
//! - [`config`]: bus settings.

mod bus;
mod config;
mod registry;
mod subscription;

pub use bus::EventBus;
pub use config::BusConfig;
pub use subscription::{ScopedSubscription, Subscription, SubscriptionId};
