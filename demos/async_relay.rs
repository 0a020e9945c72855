//! # Example: async_relay
//!
//! Synchronous producers, asynchronous consumer.
//!
//! ## Flow
//! ```text
//! main thread: bus.emit("progress", &n) ──► Relay ──► broadcast ──► tokio task: rx.recv().await
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example async_relay
//! ```

use std::time::Duration;

use evbus::EventBus;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let bus: EventBus<u32> = EventBus::new();
    let (sub, mut rx) = bus.relay("progress");

    let consumer = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(pct) => println!("[consumer] progress {pct}%"),
                Err(RecvError::Lagged(n)) => println!("[consumer] skipped {n}"),
                Err(RecvError::Closed) => break,
            }
        }
        println!("[consumer] relay closed");
    });

    for pct in (0..=100).step_by(25) {
        bus.emit("progress", &pct)?;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Dropping the relay's last sender closes the channel.
    bus.unsubscribe(&sub);
    consumer.await?;
    Ok(())
}
