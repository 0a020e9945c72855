//! # Typed event names.
//!
//! A [`Topic<P>`] binds an event name to its payload type so that a [`Hub`](crate::Hub)
//! can check listener signatures at compile time.
//!
//! ## Example
//! ```rust
//! use evbus::Topic;
//!
//! pub const USER_RENAMED: Topic<String> = Topic::new("user.renamed");
//! pub const CART_SIZE: Topic<usize> = Topic::new("cart.size");
//!
//! assert_eq!(USER_RENAMED.name(), "user.renamed");
//! ```

use std::fmt;
use std::marker::PhantomData;

/// Event name tagged with its payload type.
///
/// Two topics with the same name but different payload types are unrelated.
pub struct Topic<P> {
    name: &'static str,
    _payload: PhantomData<fn() -> P>,
}

impl<P> Topic<P> {
    /// Creates a topic; usable in `const` items.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _payload: PhantomData,
        }
    }

    /// Event name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<P> Clone for Topic<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Topic<P> {}

impl<P> fmt::Debug for Topic<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("name", &self.name)
            .field("payload", &std::any::type_name::<P>())
            .finish()
    }
}
