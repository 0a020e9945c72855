//! # Typed topics.
//!
//! - [`Topic`] event name tagged with its payload type.
//! - [`Hub`] one [`EventBus`](crate::EventBus) per topic behind a single handle.

mod hub;
mod topic;

pub use hub::Hub;
pub use topic::Topic;
