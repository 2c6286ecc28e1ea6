//! Bounded event bus between the capture loop and the decode workers.
//!
//! The producer side is non-blocking: a full queue rejects the event and
//! the caller decides what to do with it (the capture loop drops it and
//! reports the drop). The consumer side blocks until an event arrives or
//! the bus has been closed and drained.

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use thiserror::Error;

use super::raw::RawEvent;

/// Event bus error conditions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event queue capacity exceeded")]
    QueueFull,
    #[error("Event bus is closed")]
    Closed,
}

/// Bounded multi-consumer event bus with drop-on-full send semantics.
pub struct EventBus {
    tx: Mutex<Option<Sender<RawEvent>>>,
    rx: Receiver<RawEvent>,
}

impl EventBus {
    /// Creates a new event bus holding at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self {
            tx: Mutex::new(Some(tx)),
            rx,
        }
    }

    /// Attempts to enqueue an event without blocking.
    pub fn try_send(&self, event: RawEvent) -> Result<(), EventError> {
        let guard = self.tx.lock();
        let tx = guard.as_ref().ok_or(EventError::Closed)?;
        match tx.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(EventError::QueueFull),
            Err(TrySendError::Disconnected(_)) => Err(EventError::Closed),
        }
    }

    /// Blocking dequeue. Events enqueued before `close` remain
    /// receivable; once the bus is closed and drained this returns `None`.
    pub fn recv(&self) -> Option<RawEvent> {
        self.rx.recv().ok()
    }

    /// Closes the bus for further sends. Idempotent.
    pub fn close(&self) {
        self.tx.lock().take();
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.tx.lock().is_none()
    }

    /// Number of events currently queued.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_event(seq: u64) -> RawEvent {
        RawEvent::from_slice(seq, &[seq as u8])
    }

    #[test]
    fn signals_queue_full_exactly_once_past_capacity() {
        let bus = EventBus::with_capacity(4);
        for i in 0..4 {
            assert!(bus.try_send(test_event(i)).is_ok());
        }
        assert_eq!(bus.try_send(test_event(4)), Err(EventError::QueueFull));
        assert_eq!(bus.len(), 4);
    }

    #[test]
    fn drains_queued_events_after_close() {
        let bus = EventBus::with_capacity(8);
        for i in 0..3 {
            bus.try_send(test_event(i)).unwrap();
        }
        bus.close();
        assert!(bus.is_closed());
        for i in 0..3 {
            assert_eq!(bus.recv().unwrap().timestamp, i);
        }
        assert!(bus.recv().is_none());
    }

    #[test]
    fn rejects_send_after_close() {
        let bus = EventBus::with_capacity(2);
        bus.close();
        bus.close();
        assert_eq!(bus.try_send(test_event(0)), Err(EventError::Closed));
    }

    #[test]
    fn recv_blocks_until_an_event_arrives() {
        let bus = Arc::new(EventBus::with_capacity(4));
        let consumer = {
            let bus = Arc::clone(&bus);
            std::thread::spawn(move || bus.recv())
        };
        std::thread::sleep(Duration::from_millis(50));
        bus.try_send(test_event(7)).unwrap();
        let received = consumer.join().unwrap();
        assert_eq!(received.unwrap().timestamp, 7);
    }

    #[test]
    fn maintains_ordering_for_a_single_consumer() {
        let bus = EventBus::with_capacity(4);
        bus.try_send(test_event(1)).unwrap();
        bus.try_send(test_event(2)).unwrap();
        assert_eq!(bus.recv().unwrap().timestamp, 1);
        assert_eq!(bus.recv().unwrap().timestamp, 2);
    }
}
