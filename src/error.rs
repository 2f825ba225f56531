//! Error kinds exchanged across the `Vconn` boundary and surfaced to callers.
//!
//! Mirrors the shape of `quinn_proto`'s `ConnectionError`/`EndpointError`:
//! one `Fail`-derived enum per boundary, each variant a distinct caller-
//! visible failure mode, rather than a single stringly-typed error.

use failure::Fail;

/// Errors a [`crate::vconn::Vconn`] implementation may report.
///
/// `WouldBlock` is the "retryable-busy" condition: it is never surfaced
/// past the core, it only causes re-waiting.
#[derive(Debug, Fail)]
pub enum VconnError {
    /// The operation would block; retry once the scheduler says the
    /// transport is ready.
    #[fail(display = "operation would block")]
    WouldBlock,
    /// The peer closed the transport cleanly (EOF).
    #[fail(display = "peer closed the connection")]
    PeerClosed,
    /// Any other transport failure. Carries a human-readable reason since
    /// the transport contract does not specify a wire-level error taxonomy.
    #[fail(display = "transport error: {}", _0)]
    Fatal(String),
}

impl VconnError {
    pub fn is_would_block(&self) -> bool {
        matches!(self, VconnError::WouldBlock)
    }
}

/// Errors surfaced to the caller of [`crate::connection::Connection`].
///
/// These are the *only* errors that escape the core; every `VconnError` is
/// absorbed into a state transition and logged instead.
#[derive(Debug, Fail, PartialEq, Eq, Clone, Copy)]
pub enum RconnError {
    /// `send` was called while not in `Active`/`Idle`.
    #[fail(display = "not connected")]
    NotConnected,
    /// `send_with_limit` rejected the message because the caller's packet
    /// counter is already at its cap.
    #[fail(display = "queue limit reached, retry later")]
    RetryLater,
}
