//! The transport contract the core is built against.
//!
//! `Vconn` is an external, possibly-failing byte-level connection. The core
//! never knows whether a concrete `Vconn` is a TCP socket, a TLS session, or
//! (as in tests) an in-memory stub — it only calls the five operations
//! below and the two `wait_*` registration hooks.

use bytes::Bytes;
use std::net::IpAddr;

use crate::clock::Scheduler;
use crate::error::VconnError;

/// A single logical byte-stream connection to a peer.
///
/// Implementations are expected to be non-blocking: `poll_connect`, `send`,
/// and `recv` all return [`VconnError::WouldBlock`] rather than blocking the
/// calling thread, consistent with the single-threaded cooperative model
/// the whole crate runs under.
pub trait Vconn {
    /// Advance a connection attempt begun by [`open`](VconnOpenFn). Returns
    /// `Ok(())` once the transport is ready for `send`/`recv`,
    /// `Err(WouldBlock)` while still connecting, or a fatal error.
    fn poll_connect(&mut self) -> Result<(), VconnError>;

    /// Submit one message. Only ever called on a transport for which
    /// `poll_connect` has returned `Ok(())`.
    fn send(&mut self, msg: &Bytes) -> Result<(), VconnError>;

    /// Retrieve one message, if any is ready.
    fn recv(&mut self) -> Result<Bytes, VconnError>;

    /// Register send-readiness with the host scheduler.
    fn wait_send(&self, scheduler: &mut dyn Scheduler);

    /// Register recv-readiness with the host scheduler.
    fn wait_recv(&self, scheduler: &mut dyn Scheduler);

    /// The locally bound address, if known.
    fn local_ip(&self) -> Option<IpAddr> {
        None
    }

    /// The peer's address, if known.
    fn remote_ip(&self) -> Option<IpAddr> {
        None
    }

    /// The peer's port, if known.
    fn remote_port(&self) -> Option<u16> {
        None
    }
}

/// A factory for opening a named transport.
///
/// Real deployments register one of these per transport class (`tcp:`,
/// `ssl:`, `unix:`, ...); the core itself is agnostic to how `name` is
/// interpreted. Modeled as a plain function pointer rather than a trait
/// object because opening a transport is a stateless, global operation, not
/// one tied to an existing instance.
pub type VconnOpenFn = fn(name: &str) -> Result<Box<dyn Vconn>, VconnError>;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Scripted outcomes for [`MemoryVconn::poll_connect`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) enum ConnectStep {
        Busy,
        Ready,
        Fatal,
    }

    struct Shared {
        connect_script: VecDeque<ConnectStep>,
        connected: bool,
        inbound: VecDeque<Bytes>,
        outbound: Vec<Bytes>,
        send_busy: bool,
        send_fatal: bool,
        recv_peer_closed: bool,
        closed: bool,
    }

    /// An in-process stand-in for a real transport, driven entirely by the
    /// test that owns the [`MemoryVconnHandle`].
    pub(crate) struct MemoryVconn {
        shared: Rc<RefCell<Shared>>,
    }

    /// The test-side handle used to script and inspect a [`MemoryVconn`]
    /// after it has been handed to a `Connection`.
    #[derive(Clone)]
    pub(crate) struct MemoryVconnHandle {
        shared: Rc<RefCell<Shared>>,
    }

    pub(crate) fn memory_vconn_pair() -> (MemoryVconn, MemoryVconnHandle) {
        let shared = Rc::new(RefCell::new(Shared {
            connect_script: VecDeque::new(),
            connected: false,
            inbound: VecDeque::new(),
            outbound: Vec::new(),
            send_busy: false,
            send_fatal: false,
            recv_peer_closed: false,
            closed: false,
        }));
        (
            MemoryVconn {
                shared: shared.clone(),
            },
            MemoryVconnHandle { shared },
        )
    }

    impl MemoryVconnHandle {
        pub(crate) fn script_connect(&self, steps: impl IntoIterator<Item = ConnectStep>) {
            self.shared.borrow_mut().connect_script.extend(steps);
        }

        pub(crate) fn push_inbound(&self, msg: Bytes) {
            self.shared.borrow_mut().inbound.push_back(msg);
        }

        pub(crate) fn set_send_busy(&self, busy: bool) {
            self.shared.borrow_mut().send_busy = busy;
        }

        pub(crate) fn set_send_fatal(&self, fatal: bool) {
            self.shared.borrow_mut().send_fatal = fatal;
        }

        pub(crate) fn set_recv_peer_closed(&self, closed: bool) {
            self.shared.borrow_mut().recv_peer_closed = closed;
        }

        pub(crate) fn sent(&self) -> Vec<Bytes> {
            self.shared.borrow().outbound.clone()
        }

        pub(crate) fn is_closed(&self) -> bool {
            self.shared.borrow().closed
        }
    }

    impl Vconn for MemoryVconn {
        fn poll_connect(&mut self) -> Result<(), VconnError> {
            let mut shared = self.shared.borrow_mut();
            match shared.connect_script.pop_front().unwrap_or(ConnectStep::Ready) {
                ConnectStep::Busy => Err(VconnError::WouldBlock),
                ConnectStep::Ready => {
                    shared.connected = true;
                    Ok(())
                }
                ConnectStep::Fatal => Err(VconnError::Fatal("connect failed".into())),
            }
        }

        fn send(&mut self, msg: &Bytes) -> Result<(), VconnError> {
            let mut shared = self.shared.borrow_mut();
            if shared.send_fatal {
                return Err(VconnError::Fatal("send failed".into()));
            }
            if shared.send_busy {
                return Err(VconnError::WouldBlock);
            }
            shared.outbound.push(msg.clone());
            Ok(())
        }

        fn recv(&mut self) -> Result<Bytes, VconnError> {
            let mut shared = self.shared.borrow_mut();
            match shared.inbound.pop_front() {
                Some(msg) => Ok(msg),
                None if shared.recv_peer_closed => Err(VconnError::PeerClosed),
                None => Err(VconnError::WouldBlock),
            }
        }

        fn wait_send(&self, _scheduler: &mut dyn Scheduler) {}
        fn wait_recv(&self, _scheduler: &mut dyn Scheduler) {}
    }

    impl Drop for MemoryVconn {
        fn drop(&mut self) {
            self.shared.borrow_mut().closed = true;
        }
    }
}
