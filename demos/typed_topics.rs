//! # Example: typed_topics
//!
//! One [`Hub`] carrying events with different payload types.
//! A listener for [`Topic<usize>`] cannot be attached to a [`Topic<String>`]:
//! the mismatch is a compile error, not a runtime surprise.
//!
//! ## Run
//! ```bash
//! cargo run --example typed_topics
//! ```

use evbus::{EmitError, Hub, ListenerError, Topic};

const USER_RENAMED: Topic<String> = Topic::new("user.renamed");
const CART_SIZE: Topic<usize> = Topic::new("cart.size");

fn main() -> Result<(), EmitError> {
    let hub = Hub::new();

    hub.on(&USER_RENAMED, |name: &String| println!("[header] hello, {name}"));
    hub.on(&CART_SIZE, |n: &usize| println!("[footer] {n} item(s) in cart"));

    let forward = hub.clone();
    hub.subscribe_fn(&CART_SIZE, move |n: &usize| {
        if *n > 2 {
            forward
                .emit(&USER_RENAMED, &"big spender".to_string())
                .map_err(|e| ListenerError::fail(e.as_message()))?;
        }
        Ok(())
    });

    hub.emit(&USER_RENAMED, &"alice".to_string())?;
    for n in 1..=3 {
        hub.emit(&CART_SIZE, &n)?;
    }

    println!("topics: {}", hub.topic_count());
    Ok(())
}
