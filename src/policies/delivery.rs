//! # Delivery policies for listener failures.
//!
//! [`DeliveryPolicy`] determines what `emit` does when a listener fails.
//!
//! - [`DeliveryPolicy::FailFast`] stops at the first failing listener (default).
//! - [`DeliveryPolicy::Isolate`] invokes every listener and reports all failures together.
//!
//! ## Choosing the right policy
//!
//! **Producer must know about the first failure** (default):
//! ```text
//! DeliveryPolicy::FailFast  → L1 ok, L2 Err ──► emit returns Err, L3 not invoked
//!                             L2 panics     ──► panic unwinds to the emit caller
//! ```
//!
//! **Listeners are independent plugins**:
//! ```text
//! DeliveryPolicy::Isolate   → L1 ok, L2 Err, L3 panics, L4 ok
//!                             ──► all four invoked, emit returns Isolated{[L2, L3]}
//! ```
//!
//! Neither policy touches the registry: later emits behave normally.

/// Policy controlling how `emit` reacts to a failing listener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Stop delivery at the first `Err`; panics are not caught (default).
    #[default]
    FailFast,
    /// Invoke every listener in the snapshot; catch panics and collect failures.
    Isolate,
}

impl DeliveryPolicy {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            DeliveryPolicy::FailFast => "fail_fast",
            DeliveryPolicy::Isolate => "isolate",
        }
    }
}
