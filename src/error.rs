//! Error types used by the bus and by listeners.
//!
//! This module defines two main error enums:
//!
//! - [`ListenerError`] errors raised by an individual listener invocation.
//! - [`EmitError`] errors returned to the caller of [`EventBus::emit`](crate::EventBus::emit).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced by a listener.
///
/// A listener signals failure by returning one of these from
/// [`Listen::on_event`](crate::Listen::on_event). Panics are converted into
/// [`ListenerError::Panicked`] only under [`DeliveryPolicy::Isolate`](crate::DeliveryPolicy::Isolate).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The listener reported a failure.
    #[error("listener failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The listener panicked while handling the payload.
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic message, or `"unknown panic"` if the payload was not a string.
        info: String,
    },
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Failed`] from anything displayable.
    ///
    /// # Example
    /// ```
    /// use evbus::ListenerError;
    ///
    /// let err = ListenerError::fail("disk full");
    /// assert_eq!(err.to_string(), "listener failed: disk full");
    /// ```
    pub fn fail(error: impl std::fmt::Display) -> Self {
        ListenerError::Failed {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { error } => format!("error: {error}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let info = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        ListenerError::Panicked { info }
    }
}

/// One failed invocation collected under [`DeliveryPolicy::Isolate`](crate::DeliveryPolicy::Isolate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Position of the listener in the emit snapshot (0-based).
    pub index: usize,
    /// Listener name as reported by [`Listen::name`](crate::Listen::name).
    pub listener: String,
    /// What went wrong.
    pub error: ListenerError,
}

/// # Errors returned by `emit`.
///
/// Emitting to an event without listeners is never an error.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// A listener failed and delivery stopped (fail-fast).
    ///
    /// Listeners after `index` in the snapshot were not invoked.
    #[error("listener '{listener}' #{index} failed on '{event}': {source}")]
    Listener {
        /// Event name that was being emitted.
        event: String,
        /// Name of the failing listener.
        listener: String,
        /// Position of the failing listener in the snapshot.
        index: usize,
        /// The listener's error.
        #[source]
        source: ListenerError,
    },

    /// One or more listeners failed; all listeners were still invoked.
    #[error("{} listener(s) failed on '{event}'", .failures.len())]
    Isolated {
        /// Event name that was being emitted.
        event: String,
        /// Every failure, in delivery order.
        failures: Vec<ListenerFailure>,
    },
}

impl EmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use evbus::{EmitError, ListenerError};
    ///
    /// let err = EmitError::Listener {
    ///     event: "ping".into(),
    ///     listener: "a".into(),
    ///     index: 0,
    ///     source: ListenerError::fail("boom"),
    /// };
    /// assert_eq!(err.as_label(), "emit_listener_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::Listener { .. } => "emit_listener_failed",
            EmitError::Isolated { .. } => "emit_isolated_failures",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitError::Listener {
                event,
                listener,
                index,
                source,
            } => format!(
                "event={event} listener={listener} index={index} {}",
                source.as_message()
            ),
            EmitError::Isolated { event, failures } => {
                let names: Vec<&str> = failures.iter().map(|f| f.listener.as_str()).collect();
                format!("event={event} failed={names:?}")
            }
        }
    }

    /// Event name the failed emission targeted.
    pub fn event(&self) -> &str {
        match self {
            EmitError::Listener { event, .. } | EmitError::Isolated { event, .. } => event,
        }
    }

    /// All listener failures carried by this error, in delivery order.
    pub fn failures(&self) -> Vec<ListenerFailure> {
        match self {
            EmitError::Listener {
                listener,
                index,
                source,
                ..
            } => vec![ListenerFailure {
                index: *index,
                listener: listener.clone(),
                error: source.clone(),
            }],
            EmitError::Isolated { failures, .. } => failures.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_str() {
        let err = ListenerError::from_panic(Box::new("boom"));
        assert_eq!(
            err,
            ListenerError::Panicked {
                info: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_panic_payload_string() {
        let err = ListenerError::from_panic(Box::new(String::from("kaboom")));
        assert_eq!(err.as_message(), "panic: kaboom");
    }

    #[test]
    fn test_panic_payload_unknown() {
        let err = ListenerError::from_panic(Box::new(42_u32));
        assert_eq!(err.as_label(), "listener_panicked");
        assert_eq!(err.as_message(), "panic: unknown panic");
    }

    #[test]
    fn test_isolated_failures_and_display() {
        let err = EmitError::Isolated {
            event: "save".into(),
            failures: vec![
                ListenerFailure {
                    index: 0,
                    listener: "a".into(),
                    error: ListenerError::fail("x"),
                },
                ListenerFailure {
                    index: 2,
                    listener: "c".into(),
                    error: ListenerError::fail("y"),
                },
            ],
        };
        assert_eq!(err.to_string(), "2 listener(s) failed on 'save'");
        assert_eq!(err.event(), "save");
        assert_eq!(err.failures().len(), 2);
        assert_eq!(err.as_message(), r#"event=save failed=["a", "c"]"#);
    }

    #[test]
    fn test_fail_fast_error_exposes_source() {
        use std::error::Error as _;

        let err = EmitError::Listener {
            event: "ping".into(),
            listener: "b".into(),
            index: 1,
            source: ListenerError::fail("nope"),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("listener failed: nope"));
        assert_eq!(err.failures()[0].index, 1);
    }
}
