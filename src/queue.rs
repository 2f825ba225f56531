//! The outbound send queue.
//!
//! A plain FIFO of `{message, optional counter}` pairs; the counter
//! back-reference is just the second element of the tuple rather than an
//! intrusive field on the message.

use bytes::Bytes;
use std::collections::VecDeque;

use crate::counter::PacketCounter;

/// One outbound message awaiting transmission, with the packet counter (if
/// any) the caller attached when it was queued.
pub struct Queued {
    pub msg: Bytes,
    pub counter: Option<PacketCounter>,
}

/// FIFO of outbound messages.
#[derive(Default)]
pub struct TxQueue {
    queue: VecDeque<Queued>,
}

impl TxQueue {
    pub fn new() -> Self {
        TxQueue {
            queue: VecDeque::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Push a message to the tail, incrementing its counter if any.
    pub fn push(&mut self, msg: Bytes, counter: Option<PacketCounter>) {
        if let Some(c) = &counter {
            c.inc();
        }
        self.queue.push_back(Queued { msg, counter });
    }

    pub fn front(&self) -> Option<&Queued> {
        self.queue.front()
    }

    /// Remove the head after it has been accepted by the transport,
    /// decrementing its counter if any.
    pub fn pop_sent(&mut self) {
        if let Some(q) = self.queue.pop_front() {
            if let Some(c) = q.counter {
                c.dec();
            }
        }
    }

    /// Drop every queued message, decrementing counters as it goes. Returns
    /// the number of messages discarded, for coverage accounting.
    pub fn flush(&mut self) -> usize {
        let n = self.queue.len();
        for q in self.queue.drain(..) {
            if let Some(c) = q.counter {
                c.dec();
            }
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_increments_counter() {
        let mut q = TxQueue::new();
        let c = PacketCounter::new();
        q.push(Bytes::from_static(b"hi"), Some(c.clone()));
        assert_eq!(c.n(), 1);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn pop_sent_decrements_counter() {
        let mut q = TxQueue::new();
        let c = PacketCounter::new();
        q.push(Bytes::from_static(b"hi"), Some(c.clone()));
        q.pop_sent();
        assert_eq!(c.n(), 0);
        assert!(q.is_empty());
    }

    #[test]
    fn flush_decrements_all_counters() {
        let mut q = TxQueue::new();
        let c1 = PacketCounter::new();
        let c2 = PacketCounter::new();
        q.push(Bytes::from_static(b"a"), Some(c1.clone()));
        q.push(Bytes::from_static(b"b"), Some(c2.clone()));
        q.push(Bytes::from_static(b"c"), None);
        assert_eq!(q.flush(), 3);
        assert_eq!(c1.n(), 0);
        assert_eq!(c2.n(), 0);
        assert!(q.is_empty());
    }
}
