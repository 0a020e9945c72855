//! # Policies applied by the bus during emission.
//!
//! - [`DeliveryPolicy`] fail-fast or isolate-and-continue handling of listener failures.

mod delivery;

pub use delivery::DeliveryPolicy;
