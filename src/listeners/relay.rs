//! # Relay: bridge from synchronous emits to async consumers.
//!
//! [`Relay`] is a listener that forwards a clone of every payload into a
//! [`tokio::sync::broadcast`] channel, so tasks can `recv().await` emissions
//! while the bus itself stays synchronous.
//!
//! ## Architecture
//! ```text
//! emit("tick", &p) ──► L1 ──► Relay::on_event ──► broadcast::Sender ──► Receiver A (task)
//!                      (sync, in order)               (ring buffer)   └► Receiver B (task)
//! ```
//!
//! ## Rules
//! - **Never fails**: sending without receivers drops the payload silently.
//! - **Bounded capacity**: one ring buffer shared by all receivers (min 1).
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: receivers only see payloads sent after they subscribed.

use tokio::sync::broadcast;

use crate::error::ListenerError;
use crate::listeners::listener::Listen;

/// Listener forwarding payload clones into a broadcast channel.
///
/// Cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Relay<P> {
    tx: broadcast::Sender<P>,
}

impl<P: Clone> Relay<P> {
    /// Creates a new relay with the given channel capacity.
    ///
    /// ### Notes
    /// - Capacity is **shared** across all receivers (not per-receiver).
    /// - The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<P>(capacity);
        Self { tx }
    }

    /// Creates a new receiver that will observe subsequently relayed payloads.
    pub fn subscribe(&self) -> broadcast::Receiver<P> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<P> Listen<P> for Relay<P>
where
    P: Clone + Send + 'static,
{
    fn on_event(&self, payload: &P) -> Result<(), ListenerError> {
        let _ = self.tx.send(payload.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "relay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn test_no_receivers_is_not_an_error() {
        let relay = Relay::<u8>::new(4);
        assert_eq!(relay.receiver_count(), 0);
        assert!(relay.on_event(&1).is_ok());
    }

    #[test]
    fn test_capacity_clamped() {
        let relay = Relay::<u8>::new(0);
        let mut rx = relay.subscribe();
        relay.on_event(&7).unwrap();
        assert_eq!(rx.try_recv(), Ok(7));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_receivers_see_payloads_in_order() {
        let relay = Relay::<String>::new(8);
        let mut a = relay.subscribe();
        let mut b = relay.subscribe();

        relay.on_event(&"one".to_string()).unwrap();
        relay.on_event(&"two".to_string()).unwrap();

        assert_eq!(a.recv().await.unwrap(), "one");
        assert_eq!(a.recv().await.unwrap(), "two");
        assert_eq!(b.recv().await.unwrap(), "one");
    }
}
