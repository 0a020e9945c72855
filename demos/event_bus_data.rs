//! # Example: event_bus_data
//!
//! Two widgets that never reference each other exchange a string through the bus.
//!
//! Shows how to:
//! - Subscribe once at component initialization.
//! - Emit from another component.
//! - Deregister with the returned [`Subscription`](evbus::Subscription).
//!
//! ## Flow
//! ```text
//! Child::mount()  ──► bus.on("eventBusData", ...)
//! Parent::click() ──► bus.emit("eventBusData", &"Hello from Event Bus!")
//!                        └─► Child listener: "EventBus Data Received: ..."
//! Child::unmount() ─► bus.unsubscribe(&sub)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=evbus=debug cargo run --example event_bus_data
//! ```

use evbus::{EmitError, EventBus, Subscription};
use tracing_subscriber::EnvFilter;

const EVENT: &str = "eventBusData";

struct Parent {
    bus: EventBus<String>,
}

impl Parent {
    fn click(&self) -> Result<(), EmitError> {
        self.bus.emit(EVENT, &"Hello from Event Bus!".to_string())
    }
}

struct Child {
    bus: EventBus<String>,
    sub: Subscription,
}

impl Child {
    fn mount(bus: &EventBus<String>) -> Self {
        let sub = bus.on(EVENT, |data: &String| {
            println!("EventBus Data Received: {data}");
        });
        Self {
            bus: bus.clone(),
            sub,
        }
    }

    fn unmount(self) {
        self.bus.unsubscribe(&self.sub);
    }
}

fn main() -> Result<(), EmitError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bus = EventBus::new();
    let parent = Parent { bus: bus.clone() };
    let child = Child::mount(&bus);

    parent.click()?;
    parent.click()?;

    child.unmount();
    parent.click()?; // nobody listens: no-op

    println!("listeners left: {}", bus.len());
    Ok(())
}
