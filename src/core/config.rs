//! # Bus configuration.
//!
//! Provides [`BusConfig`] centralized settings for an [`EventBus`](crate::EventBus)
//! or for every bus created by a [`Hub`](crate::Hub).
//!
//! ## Sentinel values
//! - `relay_capacity = 0` → clamped to 1 by [`BusConfig::relay_capacity_clamped`]

use crate::policies::DeliveryPolicy;

/// Configuration for an event bus.
///
/// ## Field semantics
/// - `delivery`: what `emit` does when a listener fails
/// - `relay_capacity`: default ring buffer size for [`EventBus::relay`](crate::EventBus::relay)
///
/// ## Notes
/// All fields are public for flexibility. Configuration is fixed at construction;
/// clones of a bus share it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// Listener failure handling during `emit`.
    pub delivery: DeliveryPolicy,

    /// Capacity of the broadcast channel created by `EventBus::relay`.
    ///
    /// Slow receivers lagging behind more than `relay_capacity` payloads observe
    /// `Lagged` and skip older items. Minimum value is 1.
    pub relay_capacity: usize,
}

impl BusConfig {
    /// Shorthand for a config with the given delivery policy and default capacity.
    #[must_use]
    pub fn with_delivery(delivery: DeliveryPolicy) -> Self {
        Self {
            delivery,
            ..Self::default()
        }
    }

    /// Returns the relay capacity clamped to a minimum of 1.
    #[inline]
    pub fn relay_capacity_clamped(&self) -> usize {
        self.relay_capacity.max(1)
    }
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `delivery = DeliveryPolicy::FailFast`
    /// - `relay_capacity = 256`
    fn default() -> Self {
        Self {
            delivery: DeliveryPolicy::default(),
            relay_capacity: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BusConfig::default();
        assert_eq!(cfg.delivery, DeliveryPolicy::FailFast);
        assert_eq!(cfg.relay_capacity_clamped(), 256);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let cfg = BusConfig {
            relay_capacity: 0,
            ..BusConfig::with_delivery(DeliveryPolicy::Isolate)
        };
        assert_eq!(cfg.relay_capacity_clamped(), 1);
        assert_eq!(cfg.delivery, DeliveryPolicy::Isolate);
    }
}
