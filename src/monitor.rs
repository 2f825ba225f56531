//! Passive monitor fan-out.
//!
//! Monitors receive a clone of every inbound and outbound message. A
//! monitor that reports `WouldBlock` is kept around for the next attempt; a
//! monitor that reports anything else is assumed dead and dropped.

use bytes::Bytes;
use slog::{debug, Logger};

use crate::vconn::Vconn;

/// Compile-time bound on the number of simultaneous monitors.
pub const MAX_MONITORS: usize = 8;

/// A bounded, owned collection of passive observer transports.
#[derive(Default)]
pub struct MonitorSet {
    monitors: Vec<Box<dyn Vconn>>,
}

impl MonitorSet {
    pub fn new() -> Self {
        MonitorSet {
            monitors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Add a monitor, taking ownership of it. Over-capacity handles are
    /// dropped (closing them) immediately rather than queued.
    pub fn add(&mut self, monitor: Box<dyn Vconn>, log: &Logger) {
        if self.monitors.len() >= MAX_MONITORS {
            debug!(log, "monitor capacity reached, closing new monitor"; "capacity" => MAX_MONITORS);
            return;
        }
        self.monitors.push(monitor);
    }

    /// Clone `msg` to every monitor, in order. A monitor reporting a
    /// non-busy error is removed by swap-with-last; order among the
    /// remaining monitors is not preserved.
    pub fn relay(&mut self, msg: &Bytes, log: &Logger) {
        let mut i = 0;
        while i < self.monitors.len() {
            match self.monitors[i].send(msg) {
                Ok(()) => i += 1,
                Err(e) if e.is_would_block() => i += 1,
                Err(e) => {
                    debug!(log, "closing monitor after send error"; "reason" => %e, "index" => i);
                    self.monitors.swap_remove(i);
                }
            }
        }
    }

    /// Close every monitor (by dropping it).
    pub fn clear(&mut self) {
        self.monitors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vconn::testing::memory_vconn_pair;
    use slog::{o, Discard};

    fn test_logger() -> Logger {
        Logger::root(Discard, o!())
    }

    #[test]
    fn over_capacity_monitor_is_dropped_immediately() {
        let mut set = MonitorSet::new();
        let log = test_logger();
        let mut handles = Vec::new();
        for _ in 0..MAX_MONITORS {
            let (vconn, handle) = memory_vconn_pair();
            handles.push(handle);
            set.add(Box::new(vconn), &log);
        }
        assert_eq!(set.len(), MAX_MONITORS);

        let (extra, extra_handle) = memory_vconn_pair();
        set.add(Box::new(extra), &log);
        assert_eq!(set.len(), MAX_MONITORS);
        assert!(extra_handle.is_closed());
    }

    #[test]
    fn relay_removes_monitor_on_fatal_error() {
        let mut set = MonitorSet::new();
        let log = test_logger();
        let (good, good_handle) = memory_vconn_pair();
        let (bad, bad_handle) = memory_vconn_pair();
        bad_handle.set_send_fatal(true);
        set.add(Box::new(good), &log);
        set.add(Box::new(bad), &log);

        set.relay(&Bytes::from_static(b"x"), &log);
        assert_eq!(set.len(), 1);
        assert_eq!(good_handle.sent().len(), 1);
    }

    #[test]
    fn relay_keeps_monitor_on_would_block() {
        let mut set = MonitorSet::new();
        let log = test_logger();
        let (busy, busy_handle) = memory_vconn_pair();
        busy_handle.set_send_busy(true);
        set.add(Box::new(busy), &log);

        set.relay(&Bytes::from_static(b"x"), &log);
        assert_eq!(set.len(), 1);
    }
}
