//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(&P) -> Result<(), ListenerError>` together with a name.
//! Shared state lives in the closure's captures; use `Arc<...>` explicitly when it
//! has to be observed from outside.
//!
//! ## Example
//! ```rust
//! use evbus::{Listen, ListenerFn, ListenerRef, ListenerError};
//!
//! let l: ListenerRef<String> = ListenerFn::arc("printer", |msg: &String| {
//!     println!("{msg}");
//!     Ok::<_, ListenerError>(())
//! });
//!
//! assert_eq!(l.name(), "printer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::ListenerError;
use crate::listeners::listener::Listen;

/// Function-backed listener implementation.
#[derive(Debug)]
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<P, F> Listen<P> for ListenerFn<F>
where
    F: Fn(&P) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, payload: &P) -> Result<(), ListenerError> {
        (self.f)(payload)
    }
}
