//! # Diagnostic Event Bus
//!
//! Carries [`PoolEvent`]s from a pool to whoever wants to observe them
//! (stage HUD, tests, tuning tools).
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │    Pool     │─────>│   Event     │─────>│  Observer   │
//! │ (emitter)   │      │   Channel   │      │ (drains)    │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Bounded so a forgotten receiver cannot grow memory. When the channel is
//! full the event is dropped; the `tracing` record is still written.

use barrage_shared::PoolEvent;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Pre-allocated channel for pool diagnostics.
pub struct EventBus {
    /// Sender end - held by pools.
    sender: Sender<PoolEvent>,
    /// Receiver end - held by observers.
    receiver: Receiver<PoolEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events in flight before new ones are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple pools).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a new pair of sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for sending events.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<PoolEvent>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: PoolEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone, Debug)]
pub struct EventReceiver {
    receiver: Receiver<PoolEvent>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<PoolEvent> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<PoolEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_shared::BulletKind;

    #[test]
    fn test_event_send_receive() {
        let (sender, receiver) = EventBus::create_pair(8);

        assert!(sender.send(PoolEvent::exhausted(BulletKind::Hamon, 4)));
        assert!(receiver.has_events());

        let received = receiver.try_recv().unwrap();
        if let PoolEvent::Exhausted { live_count, .. } = received {
            assert_eq!(live_count, 4);
        } else {
            panic!("Wrong event type");
        }
    }

    #[test]
    fn test_full_bus_drops() {
        let (sender, receiver) = EventBus::create_pair(1);
        let event = PoolEvent::Prewarmed {
            kind: BulletKind::TopLeft,
            count: 2,
        };

        assert!(sender.send(event.clone()));
        assert!(!sender.send(event));
        assert_eq!(receiver.drain().len(), 1);
        assert!(!receiver.has_events());
    }
}
