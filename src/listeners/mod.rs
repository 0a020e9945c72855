//! # Listeners invoked by the bus.
//!
//! This module provides the [`Listen`] trait and built-in implementations.
//!
//! ## Listener types
//! - [`ListenerFn`] wraps a named closure.
//! - [`Relay`] forwards payloads into a `tokio::sync::broadcast` channel for async consumers.
//! - `LogListener` _(feature `logging`)_ writes payloads through `tracing`.

mod listener;
mod listener_fn;
#[cfg(feature = "logging")]
mod log;
mod relay;

pub use listener::{Listen, ListenerRef};
pub use listener_fn::ListenerFn;
#[cfg(feature = "logging")]
pub use log::LogListener;
pub use relay::Relay;
