//! # Example: custom_listener
//!
//! Demonstrates how to build a custom listener and how delivery policies differ.
//!
//! Shows how to:
//! - Implement the [`Listen`] trait with internal counters.
//! - Combine it with the built-in [`LogListener`].
//! - Observe fail-fast vs isolate-and-continue on a failing listener.
//!
//! ## Run
//! Requires the `logging` feature to export [`LogListener`].
//! ```bash
//! cargo run --example custom_listener --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use evbus::{
    BusConfig, DeliveryPolicy, EventBus, Listen, ListenerError, ListenerFn, ListenerRef,
    LogListener,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
enum Payment {
    Settled { cents: u64 },
    Declined { reason: &'static str },
}

struct Ledger {
    settled: AtomicU64,
    declined: AtomicU64,
}

impl Ledger {
    fn new() -> Self {
        Self {
            settled: AtomicU64::new(0),
            declined: AtomicU64::new(0),
        }
    }

    fn print_stats(&self) {
        println!("Ledger:");
        println!(" ├─► Settled cents: {}", self.settled.load(Ordering::Relaxed));
        println!(" └─► Declined:      {}", self.declined.load(Ordering::Relaxed));
    }
}

impl Listen<Payment> for Ledger {
    fn on_event(&self, payment: &Payment) -> Result<(), ListenerError> {
        match payment {
            Payment::Settled { cents } => {
                self.settled.fetch_add(*cents, Ordering::Relaxed);
            }
            Payment::Declined { .. } => {
                self.declined.fetch_add(1, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "ledger"
    }
}

fn strict_auditor() -> ListenerRef<Payment> {
    ListenerFn::arc("auditor", |payment: &Payment| match payment {
        Payment::Declined { reason } => Err(ListenerError::fail(format!("declined: {reason}"))),
        Payment::Settled { .. } => Ok(()),
    })
}

fn run(policy: DeliveryPolicy) {
    println!("\n=== {} ===", policy.as_label());

    let bus: EventBus<Payment> = EventBus::with_config(BusConfig::with_delivery(policy));
    let ledger = Arc::new(Ledger::new());

    bus.subscribe("payment", Arc::new(LogListener::new("log")));
    bus.subscribe("payment", strict_auditor());
    bus.subscribe("payment", ledger.clone());

    let payments = [
        Payment::Settled { cents: 1250 },
        Payment::Declined { reason: "card expired" },
        Payment::Settled { cents: 300 },
    ];
    for p in &payments {
        if let Err(err) = bus.emit("payment", p) {
            println!("[emit] {}: {}", err.as_label(), err);
        }
    }

    ledger.print_stats();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Fail-fast: the declined payment never reaches the ledger.
    run(DeliveryPolicy::FailFast);
    // Isolate: the ledger still sees it; the auditor failure is reported.
    run(DeliveryPolicy::Isolate);
}
