//! A one-shot, consistent snapshot of everything [`crate::connection::Connection`]
//! otherwise exposes through a cluster of individual `get_*`/`is_*` calls.
//!
//! Grounded in `quinn_proto::Endpoint`'s accessor cluster (`Endpoint` exposes
//! many small `get_*` methods rather than one status struct), but a sans-I/O
//! connection supervisor is commonly polled by an external monitoring loop
//! (metrics export, a `show` CLI command) that wants one atomic read rather
//! than several calls that could interleave with a concurrent `run()`.

use std::net::IpAddr;

use crate::clock::Seconds;
use crate::connection::State;

/// Snapshot returned by [`crate::connection::Connection::status`].
#[derive(Debug, Clone)]
pub struct ConnectionStatus {
    pub state: State,
    pub name: String,
    pub reliable: bool,

    pub is_alive: bool,
    pub is_connected: bool,
    pub is_admitted: bool,
    pub failure_duration: Seconds,
    /// Read-and-cleared at the moment this snapshot was taken; a second
    /// `status()` call right after will report `false` even if nothing
    /// else changed.
    pub is_connectivity_questionable: bool,

    pub backoff: Seconds,
    pub max_backoff: Seconds,
    pub seqno: u64,

    pub packets_sent: u64,
    pub packets_received: u64,
    pub n_attempted_connections: u64,
    pub n_successful_connections: u64,
    pub total_time_connected: Seconds,

    pub local_ip: Option<IpAddr>,
    pub remote_ip: Option<IpAddr>,
    pub remote_port: Option<u16>,

    pub queue_len: usize,
    pub monitor_count: usize,
}
