//! # Event listener trait.
//!
//! Provides [`Listen`] the extension point for reacting to emitted payloads.
//!
//! ## Rules
//! - Listeners run **synchronously** on the thread that calls `emit`.
//! - Within one `emit`, listeners run in registration order.
//! - A listener may call back into the bus (`subscribe`, `unsubscribe`, `emit`);
//!   the registry lock is never held while a listener runs.
//! - A long-running listener blocks the emitter and every listener after it.
//!
//! ## Example
//! ```rust
//! use evbus::{EventBus, Listen, ListenerError};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! #[derive(Default)]
//! struct Totals(AtomicU64);
//!
//! impl Listen<u64> for Totals {
//!     fn on_event(&self, amount: &u64) -> Result<(), ListenerError> {
//!         self.0.fetch_add(*amount, Ordering::SeqCst);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str { "totals" }
//! }
//!
//! let bus: EventBus<u64> = EventBus::new();
//! let totals = Arc::new(Totals::default());
//! bus.subscribe("deposit", totals.clone());
//! bus.emit("deposit", &40).unwrap();
//! bus.emit("deposit", &2).unwrap();
//! assert_eq!(totals.0.load(Ordering::SeqCst), 42);
//! ```

use std::sync::Arc;

use crate::error::ListenerError;

/// Callback invoked by the bus with the payload of a matching emission.
///
/// ### Implementation requirements
/// - Return quickly; the emitter waits for every listener.
/// - Report failures with `Err`; under the default fail-fast policy a panic
///   unwinds straight into the emitter.
pub trait Listen<P>: Send + Sync + 'static {
    /// Handles one payload.
    ///
    /// The payload is passed through exactly as given to `emit`.
    fn on_event(&self, payload: &P) -> Result<(), ListenerError>;

    /// Returns the listener name used in errors and logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a listener.
///
/// Registering the same handle twice creates two independent registrations.
pub type ListenerRef<P> = Arc<dyn Listen<P>>;
