//! A reliable connection supervisor for a single remote OpenFlow peer.
//!
//! `rconn` maintains a logical session that survives the underlying
//! transport coming and going: it reconnects with exponential backoff,
//! probes an otherwise-silent peer for liveness, queues outbound messages
//! across reconnects, and mirrors traffic to a bounded set of passive
//! monitors. Like `quinn_proto`, the core is sans-I/O — [`Connection`]
//! never touches a socket itself, only the [`Vconn`] trait a caller
//! supplies, so the whole state machine is deterministic and can be driven
//! from tests without a network.
//!
//! ```ignore
//! let mut conn = Connection::create(open_tcp, Config::new(60, 8), Box::new(SystemClock::new()), log);
//! conn.connect("tcp:192.0.2.1:6633");
//! loop {
//!     conn.run();
//!     let mut scheduler = MyScheduler::default();
//!     conn.run_wait(&mut scheduler);
//!     conn.recv_wait(&mut scheduler);
//!     scheduler.block_until_woken();
//!     while let Some(msg) = conn.recv() {
//!         handle(msg);
//!     }
//! }
//! ```

mod clock;
mod config;
mod connection;
mod counter;
mod coverage;
mod error;
mod monitor;
mod opcode;
mod queue;
mod status;
mod vconn;

pub use clock::{Clock, Scheduler, Seconds, SystemClock, TestClock, FOREVER};
pub use config::Config;
pub use connection::{discard_logger, Connection, State};
pub use counter::PacketCounter;
pub use coverage::{CoverageEvent, CoverageSink, NullCoverage};
pub use error::{RconnError, VconnError};
pub use status::ConnectionStatus;
pub use vconn::{Vconn, VconnOpenFn};
