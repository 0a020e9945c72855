//! # LogListener — simple payload writer
//!
//! A minimal listener that writes every payload it receives through `tracing`
//! at `INFO` level. Use it for test or demo.
//!
//! ## Example output
//! ```text
//! INFO evbus::listeners::log: event received listener="ui" payload="Data from EventBus"
//! ```

use std::borrow::Cow;
use std::fmt::Debug;

use crate::error::ListenerError;
use crate::listeners::listener::Listen;

/// Payload writer listener.
#[derive(Debug, Clone)]
pub struct LogListener {
    name: Cow<'static, str>,
}

impl LogListener {
    /// Construct a new [`LogListener`] reporting under `name`.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogListener {
    fn default() -> Self {
        Self::new("LogListener")
    }
}

impl<P: Debug> Listen<P> for LogListener {
    fn on_event(&self, payload: &P) -> Result<(), ListenerError> {
        tracing::info!(listener = %self.name, payload = ?payload, "event received");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
