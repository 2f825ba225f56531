//! The core state machine: five states, their timeout/tick handlers, and
//! the shared transition and disconnect primitives.
//!
//! `Connection` is both the data model and the outward façade — unlike
//! `quinn_proto`, where `Endpoint` is a separate layer multiplexing many
//! `Connection`s, an `rconn` connection supervises exactly one logical
//! session, so the façade and the state machine are the same struct.

use std::cmp;
use std::net::IpAddr;

use bytes::Bytes;
use slog::{debug, info, o, trace, warn, Logger};

use crate::clock::{add, sub, Clock, Scheduler, Seconds, FOREVER};
use crate::config::Config;
use crate::counter::PacketCounter;
use crate::coverage::{CoverageEvent, CoverageSink, NullCoverage};
use crate::error::RconnError;
use crate::monitor::MonitorSet;
use crate::opcode;
use crate::queue::TxQueue;
use crate::status::ConnectionStatus;
use crate::vconn::{Vconn, VconnOpenFn};

/// Rate limit on [`Connection::mark_questionable`].
const QUESTIONABLE_RATE_LIMIT: Seconds = 60;
/// Probationary window after which a silent-but-tolerant peer counts as
/// having admitted us.
const ADMISSION_PROBATION: Seconds = 30;
/// Below this much uptime, a reliable disconnect does not by itself mean
/// much about the network.
const SHORT_SESSION_THRESHOLD: Seconds = 60;
/// `attach_unreliable`'s default probe interval.
const UNRELIABLE_PROBE_INTERVAL: Seconds = 60;

/// The five states a connection moves through. The dispatch below is a
/// small match on this tag rather than a table of function pointers, since
/// Rust's `match` already gives the compiler exhaustiveness checking a
/// table lookup has to maintain by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Terminal idle. No timer, no transport.
    Void,
    /// Waiting out a reconnect delay.
    Backoff,
    /// Transport opened, handshake/connect not yet complete.
    Connecting,
    /// Connected and exchanging traffic.
    Active,
    /// A probe is outstanding; any inbound message returns us to `Active`.
    Idle,
}

impl State {
    fn is_connected(self) -> bool {
        matches!(self, State::Connecting | State::Active | State::Idle)
    }

    /// Whether time in this state counts toward `total_time_connected`
    /// (spec.md §8: "the sum of time spent with state ∈ {ACTIVE, IDLE}").
    /// Narrower than `is_connected`: `Connecting` has a live transport but
    /// is not yet counted as connected uptime.
    fn counts_as_connected_uptime(self) -> bool {
        matches!(self, State::Active | State::Idle)
    }
}

/// A reliable (or, via [`Connection::attach_unreliable`], unreliable)
/// logical session to a remote OpenFlow peer.
///
/// `Connection` never reads the wall clock on its own; it was handed a
/// [`Clock`] at construction and reads `now` from it at the top of every
/// public operation, rather than taking the current time as a parameter.
/// Tests inject a [`crate::clock::TestClock`] to control time explicitly.
pub struct Connection {
    state: State,
    state_entered: Seconds,
    vconn: Option<Box<dyn Vconn>>,
    name: String,
    reliable: bool,
    txq: TxQueue,

    backoff: Seconds,
    max_backoff: Seconds,
    /// See the design note in spec.md §9: set to [`FOREVER`] on a
    /// `Connecting`-timeout disconnect so that the *next* failure always
    /// escalates backoff rather than resetting it.
    backoff_deadline: Seconds,

    probe_interval: Seconds,
    last_received: Seconds,
    last_connected: Seconds,

    probably_admitted: bool,
    last_admitted: Seconds,

    packets_sent: u64,
    packets_received: u64,
    n_attempted_connections: u64,
    n_successful_connections: u64,

    creation_time: Seconds,
    total_time_connected: Seconds,

    questionable_connectivity: bool,
    /// `None` until the first time connectivity is marked questionable;
    /// see [`Connection::mark_questionable`].
    last_questioned: Option<Seconds>,

    seqno: u64,

    local_ip: Option<IpAddr>,
    remote_ip: Option<IpAddr>,
    remote_port: Option<u16>,

    monitors: MonitorSet,

    /// Set whenever an internal event (a queue flush, the queue draining
    /// to empty) means the host should call back in immediately rather
    /// than wait for the next scheduled timeout. Consumed by
    /// [`Connection::run_wait`].
    immediate_wake: bool,

    open_fn: VconnOpenFn,
    coverage: Box<dyn CoverageSink>,
    clock: Box<dyn Clock>,
    log: Logger,
}

impl Connection {
    /// `create(probe_interval, max_backoff)`: a fresh connection in `Void`.
    ///
    /// `open_fn` supplies the transport-class dispatch used by
    /// `connect`/reconnection (the Rust restatement of the source's
    /// global name-prefixed `vconn_open` registry — see DESIGN.md);
    /// `clock` and `log` are the ambient plumbing every operation reads
    /// time and writes diagnostics through.
    pub fn create(open_fn: VconnOpenFn, config: Config, clock: Box<dyn Clock>, log: Logger) -> Self {
        let now = clock.now();
        Connection {
            state: State::Void,
            state_entered: now,
            vconn: None,
            name: "void".to_string(),
            reliable: false,
            txq: TxQueue::new(),

            backoff: 0,
            max_backoff: config.max_backoff,
            backoff_deadline: 0,

            probe_interval: config.probe_interval,
            last_received: now,
            last_connected: now,

            probably_admitted: false,
            last_admitted: now,

            packets_sent: 0,
            packets_received: 0,
            n_attempted_connections: 0,
            n_successful_connections: 0,

            creation_time: now,
            total_time_connected: 0,

            questionable_connectivity: false,
            last_questioned: None,

            seqno: 0,

            local_ip: None,
            remote_ip: None,
            remote_port: None,

            monitors: MonitorSet::new(),

            immediate_wake: false,

            open_fn,
            coverage: Box::new(NullCoverage),
            clock,
            log,
        }
    }

    fn now(&self) -> Seconds {
        self.clock.now()
    }

    /// Install a coverage sink other than the default no-op one.
    pub fn set_coverage(&mut self, sink: Box<dyn CoverageSink>) {
        self.coverage = sink;
    }

    // ---------------------------------------------------------------
    // Façade: lifecycle
    // ---------------------------------------------------------------

    /// `connect(name)`: reset and open a reliable connection to `name`.
    ///
    /// Unlike a reconnect triggered by a later failure, the first attempt
    /// is made synchronously here rather than via a `Backoff` wait — the
    /// source only ever enters `Backoff` after a failure (spec.md §4.1),
    /// never as the initial state of a fresh `connect`.
    pub fn connect(&mut self, name: &str) {
        let now = self.now();
        self.reset_for_new_target(name, true, now);
        self.attempt_open(now);
    }

    /// `attach_unreliable(name, vconn)`: adopt an already-connected
    /// transport. The connection jumps straight to `Active`; a failure
    /// from here on goes to `Void`, never `Backoff` (spec.md §3 invariant:
    /// `state == Backoff` implies `reliable == true`).
    pub fn attach_unreliable(&mut self, name: &str, vconn: Box<dyn Vconn>) {
        let now = self.now();
        self.reset_for_new_target(name, false, now);
        self.probe_interval = UNRELIABLE_PROBE_INTERVAL;
        self.max_backoff = 0;
        self.vconn = Some(vconn);
        self.n_attempted_connections += 1;
        self.n_successful_connections += 1;
        self.transition(State::Active, now);
        self.last_connected = now;
        self.cache_endpoint_info();
        info!(self.log, "attached unreliable connection"; "name" => name);
    }

    fn reset_for_new_target(&mut self, name: &str, reliable: bool, now: Seconds) {
        self.close_transport();
        self.flush_queue();
        self.monitors.clear();
        self.name = name.to_string();
        self.reliable = reliable;
        self.backoff = 0;
        self.backoff_deadline = 0;
        self.probably_admitted = false;
        self.questionable_connectivity = false;
        self.transition(State::Void, now);
    }

    /// `reconnect()`: if connected, drop the transport and go straight to
    /// `Backoff` to retry. A no-op outside `Active`/`Idle`, per spec.md §6.
    pub fn reconnect(&mut self) {
        if self.state == State::Active || self.state == State::Idle {
            info!(self.log, "forcing reconnect");
            let now = self.now();
            self.disconnect_internal(now);
        }
    }

    /// `disconnect()`: unconditionally go to `Void`. The connection becomes
    /// unreliable afterwards — a subsequent failure (there can be none,
    /// since there's no transport) would not reconnect; the caller must
    /// call `connect` again to resume.
    pub fn disconnect(&mut self) {
        let now = self.now();
        self.close_transport();
        self.flush_queue();
        self.backoff = 0;
        self.backoff_deadline = 0;
        self.clear_cached_endpoint();
        self.reliable = false;
        self.transition(State::Void, now);
    }

    /// `destroy()`: close the transport and every monitor, flush the
    /// queue, and consume `self`. Provided for parity with spec.md §6;
    /// simply dropping the `Connection` has the same effect because `Drop`
    /// performs the same cleanup.
    pub fn destroy(mut self) {
        self.close_transport();
        self.flush_queue();
        self.monitors.clear();
    }

    // ---------------------------------------------------------------
    // Façade: the run loop
    // ---------------------------------------------------------------

    /// `run()`: drive the state machine until a tick produces no further
    /// state change (spec.md §4.1 "Run-tick algorithm"). All ticks within
    /// one call see the same `now`, read once at entry.
    pub fn run(&mut self) {
        let now = self.now();
        loop {
            let before = self.state;
            self.tick(now);
            if self.state == before {
                break;
            }
        }
    }

    fn tick(&mut self, now: Seconds) {
        match self.state {
            State::Void => {}
            State::Backoff => self.tick_backoff(now),
            State::Connecting => self.tick_connecting(now),
            State::Active => self.tick_active(now),
            State::Idle => self.tick_idle(now),
        }
    }

    fn tick_backoff(&mut self, now: Seconds) {
        if now >= add(self.state_entered, self.backoff) {
            self.attempt_open(now);
        }
    }

    fn tick_connecting(&mut self, now: Seconds) {
        let timeout = cmp::max(1, self.backoff);
        // Borrow the transport rather than taking it, the same way
        // `quinn_proto::Connection` methods borrow `self.tls` instead of
        // moving it out for the duration of a call.
        let result = self
            .vconn
            .as_mut()
            .expect("Connecting implies a transport handle is present")
            .poll_connect();
        match result {
            Ok(()) => {
                self.n_successful_connections += 1;
                self.transition(State::Active, now);
                self.last_connected = self.state_entered;
                self.cache_endpoint_info();
                info!(self.log, "connected"; "name" => &self.name);
            }
            Err(e) if e.is_would_block() => {
                if now >= add(self.state_entered, timeout) {
                    debug!(self.log, "connect attempt timed out"; "timeout" => timeout);
                    // See spec.md §9: this sentinel guarantees the backoff
                    // escalates rather than resets on this disconnect.
                    self.backoff_deadline = FOREVER;
                    self.disconnect_internal(now);
                }
            }
            Err(e) => {
                self.log_transport_error("connect", &e);
                self.disconnect_internal(now);
            }
        }
    }

    fn tick_active(&mut self, now: Seconds) {
        if self.probe_interval != 0 {
            let deadline = add(
                cmp::max(self.last_received, self.state_entered),
                self.probe_interval,
            );
            if now >= deadline {
                // Order matters (spec.md §4.1, §9): transition to `Idle`
                // *before* queuing the probe. If queuing it synchronously
                // discovers the transport is gone and disconnects us to
                // `Backoff`, we must not clobber that with a return to
                // `Idle` — so we simply stop here and let the next `run`
                // iteration dispatch whatever state we actually ended up
                // in.
                self.transition(State::Idle, now);
                trace!(self.log, "probe interval elapsed, sending echo request");
                self.coverage.record(CoverageEvent::ProbeSent);
                self.enqueue_internal(Bytes::from(vec![opcode::echo_request()]), None, now);
                return;
            }
        }
        self.do_tx_work(now);
    }

    fn tick_idle(&mut self, now: Seconds) {
        self.do_tx_work(now);
        if !self.state.is_connected() {
            return;
        }
        if now >= add(self.state_entered, self.probe_interval) {
            debug!(self.log, "no reply to inactivity probe");
            self.mark_questionable(now);
            self.disconnect_internal(now);
        }
    }

    /// Open the transport for `self.name`, counting the attempt either
    /// way. Shared by the initial `connect` and every `Backoff` timeout.
    fn attempt_open(&mut self, now: Seconds) {
        self.n_attempted_connections += 1;
        match (self.open_fn)(&self.name) {
            Ok(vconn) => {
                self.vconn = Some(vconn);
                self.transition(State::Connecting, now);
            }
            Err(e) => {
                warn!(self.log, "failed to open transport"; "name" => &self.name, "reason" => %e);
                // Same sentinel as the Connecting-timeout path (spec.md §9):
                // a synchronous open failure must escalate the next backoff,
                // not reset it, or a persistently-failing `open()` (bad
                // address, local resource exhaustion) would loop at
                // backoff == 1 forever since this disconnect always lands
                // exactly on the previous backoff_deadline.
                self.backoff_deadline = FOREVER;
                self.disconnect_internal(now);
            }
        }
    }

    // ---------------------------------------------------------------
    // Shared primitives (spec.md §4.1)
    // ---------------------------------------------------------------

    fn transition(&mut self, new: State, now: Seconds) {
        let old = self.state;
        if (old == State::Active) != (new == State::Active) {
            self.seqno = self.seqno.wrapping_add(1);
        }
        if new.is_connected() && !old.is_connected() {
            self.probably_admitted = false;
        }
        if old.counts_as_connected_uptime() {
            self.total_time_connected = add(self.total_time_connected, sub(now, self.state_entered));
        }
        trace!(self.log, "state transition"; "from" => ?old, "to" => ?new);
        self.state = new;
        self.state_entered = now;
    }

    /// The single place a live transport is ever torn down: close it,
    /// flush the queue, and (for reliable connections) update the backoff
    /// schedule and transition to `Backoff`; for unreliable ones, go
    /// straight to `Void`.
    fn disconnect_internal(&mut self, now: Seconds) {
        self.close_transport();
        self.flush_queue();

        if self.reliable {
            if now >= self.backoff_deadline {
                self.backoff = 1;
            } else {
                self.backoff = cmp::min(self.max_backoff, cmp::max(1, self.backoff.saturating_mul(2)));
            }
            self.backoff_deadline = add(now, self.backoff);
            if sub(now, self.last_connected) > SHORT_SESSION_THRESHOLD {
                self.mark_questionable(now);
            }
            self.coverage.record(CoverageEvent::ReconnectBackoff);
            self.transition(State::Backoff, now);
            debug!(self.log, "reconnecting"; "backoff" => self.backoff);
        } else {
            self.backoff = 0;
            self.backoff_deadline = 0;
            self.clear_cached_endpoint();
            self.transition(State::Void, now);
            debug!(self.log, "unreliable connection lost");
        }
    }

    fn close_transport(&mut self) {
        self.vconn = None;
    }

    /// Log a transport-boundary error at the level spec.md §7 assigns it:
    /// a clean peer close is informational noise (debug, if this is an
    /// unreliable attachment, since there's no reconnect story to narrate),
    /// while every other transport failure is a warning and feeds backoff
    /// escalation via the ensuing `disconnect_internal`.
    fn log_transport_error(&self, context: &str, e: &crate::error::VconnError) {
        use crate::error::VconnError;
        match e {
            VconnError::PeerClosed if self.reliable => {
                info!(self.log, "peer closed connection"; "context" => context, "name" => &self.name)
            }
            VconnError::PeerClosed => {
                debug!(self.log, "peer closed connection"; "context" => context, "name" => &self.name)
            }
            _ => warn!(self.log, "transport error"; "context" => context, "reason" => %e),
        }
    }

    fn flush_queue(&mut self) {
        let flushed = self.txq.flush();
        if flushed > 0 {
            self.coverage.record(CoverageEvent::QueueFlushed(flushed));
            self.immediate_wake = true;
        }
    }

    fn mark_questionable(&mut self, now: Seconds) {
        let due = match self.last_questioned {
            None => true,
            Some(last) => sub(now, last) >= QUESTIONABLE_RATE_LIMIT,
        };
        if due {
            self.questionable_connectivity = true;
            self.last_questioned = Some(now);
            self.coverage.record(CoverageEvent::ConnectivityQuestionable);
        }
    }

    fn cache_endpoint_info(&mut self) {
        if let Some(v) = &self.vconn {
            self.local_ip = v.local_ip();
            self.remote_ip = v.remote_ip();
            self.remote_port = v.remote_port();
        }
    }

    fn clear_cached_endpoint(&mut self) {
        self.local_ip = None;
        self.remote_ip = None;
        self.remote_port = None;
    }

    // ---------------------------------------------------------------
    // Façade: send path (spec.md §4.2)
    // ---------------------------------------------------------------

    /// `send(msg, counter?)`.
    pub fn send(&mut self, msg: Bytes, counter: Option<PacketCounter>) -> Result<(), RconnError> {
        if !matches!(self.state, State::Active | State::Idle) {
            return Err(RconnError::NotConnected);
        }
        let now = self.now();
        self.enqueue_internal(msg, counter, now);
        Ok(())
    }

    /// `send_with_limit(msg, counter, limit)`. `msg` is always consumed,
    /// whatever the outcome.
    pub fn send_with_limit(
        &mut self,
        msg: Bytes,
        counter: PacketCounter,
        limit: u64,
    ) -> Result<(), RconnError> {
        if counter.n() >= limit {
            drop(msg);
            return Err(RconnError::RetryLater);
        }
        self.send(msg, Some(counter))
    }

    /// Shared tail of `send`/the probe-on-ACTIVE-timeout path: relay to
    /// monitors, enqueue, and attempt one immediate send if the queue was
    /// empty.
    fn enqueue_internal(&mut self, msg: Bytes, counter: Option<PacketCounter>, now: Seconds) {
        self.monitors.relay(&msg, &self.log);
        let was_empty = self.txq.is_empty();
        self.txq.push(msg, counter);
        if was_empty {
            self.try_send(now);
        }
    }

    fn try_send(&mut self, now: Seconds) {
        let msg = match self.txq.front() {
            Some(q) => q.msg.clone(),
            None => return,
        };
        let result = match self.vconn.as_mut() {
            Some(v) => v.send(&msg),
            None => return,
        };
        match result {
            Ok(()) => {
                self.packets_sent += 1;
                self.txq.pop_sent();
            }
            Err(e) if e.is_would_block() => {}
            Err(e) => {
                self.log_transport_error("send", &e);
                self.disconnect_internal(now);
            }
        }
    }

    /// `do_tx_work`: drain the queue until empty or the transport signals
    /// busy.
    fn do_tx_work(&mut self, now: Seconds) {
        while !self.txq.is_empty() && self.state.is_connected() {
            let before = self.txq.len();
            self.try_send(now);
            if self.txq.len() == before {
                break;
            }
        }
        if self.txq.is_empty() {
            self.immediate_wake = true;
        }
    }

    // ---------------------------------------------------------------
    // Façade: receive path (spec.md §4.3)
    // ---------------------------------------------------------------

    /// `recv()`.
    pub fn recv(&mut self) -> Option<Bytes> {
        if !matches!(self.state, State::Active | State::Idle) {
            return None;
        }
        let now = self.now();
        let msg = match self.vconn.as_mut()?.recv() {
            Ok(msg) => msg,
            Err(e) if e.is_would_block() => return None,
            Err(e) => {
                self.log_transport_error("recv", &e);
                self.disconnect_internal(now);
                return None;
            }
        };
        self.monitors.relay(&msg, &self.log);
        self.update_admission(&msg, now);
        self.last_received = now;
        self.packets_received += 1;
        if self.state == State::Idle {
            self.transition(State::Active, now);
        }
        Some(msg)
    }

    fn update_admission(&mut self, msg: &Bytes, now: Seconds) {
        let was_admitted = self.probably_admitted;
        let evidences = opcode::is_admission_evidencing(msg);
        let probation_elapsed = sub(now, self.last_connected) >= ADMISSION_PROBATION;
        if was_admitted || evidences || probation_elapsed {
            if !was_admitted {
                self.coverage.record(CoverageEvent::Admitted);
            }
            self.probably_admitted = true;
            self.last_admitted = now;
        }
    }

    // ---------------------------------------------------------------
    // Façade: wait registration
    // ---------------------------------------------------------------

    /// `run_wait()`: register a wake at the next time `run` would have
    /// anything to do.
    pub fn run_wait(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(at) = self.wake_at() {
            scheduler.wake_after(sub(at, self.now()));
        }
        if self.state.is_connected() && !self.txq.is_empty() {
            if let Some(v) = &self.vconn {
                v.wait_send(scheduler);
            }
        }
        if self.immediate_wake {
            scheduler.wake_now();
            self.immediate_wake = false;
        }
    }

    /// `recv_wait()`: register recv-readiness with the scheduler.
    pub fn recv_wait(&self, scheduler: &mut dyn Scheduler) {
        if self.state.is_connected() {
            if let Some(v) = &self.vconn {
                v.wait_recv(scheduler);
            }
        }
    }

    /// The absolute time at which the current state's timeout next fires,
    /// or `None` if the state has no timeout (`Void`, or `Active` with
    /// probing disabled).
    fn wake_at(&self) -> Option<Seconds> {
        match self.state {
            State::Void => None,
            State::Backoff => Some(add(self.state_entered, self.backoff)),
            State::Connecting => Some(add(self.state_entered, cmp::max(1, self.backoff))),
            State::Active => {
                if self.probe_interval == 0 {
                    None
                } else {
                    Some(add(
                        cmp::max(self.last_received, self.state_entered),
                        self.probe_interval,
                    ))
                }
            }
            State::Idle => Some(add(self.state_entered, self.probe_interval)),
        }
    }

    // ---------------------------------------------------------------
    // Façade: monitors
    // ---------------------------------------------------------------

    /// `add_monitor(vconn)`.
    pub fn add_monitor(&mut self, vconn: Box<dyn Vconn>) {
        self.monitors.add(vconn, &self.log);
    }

    // ---------------------------------------------------------------
    // Façade: status accessors (spec.md §6, §7; §4.6 expansion)
    // ---------------------------------------------------------------

    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the connection is trying or connected (anything but `Void`).
    pub fn is_alive(&self) -> bool {
        self.state != State::Void
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Active | State::Idle)
    }

    pub fn is_admitted(&self) -> bool {
        self.probably_admitted
    }

    /// Seconds since we were last connected, or `0` if currently connected.
    pub fn failure_duration(&self) -> Seconds {
        if self.is_connected() {
            0
        } else {
            sub(self.now(), self.last_connected)
        }
    }

    /// Read-and-clear the questionable-connectivity flag (spec.md §4.1:
    /// "cleared by the read-side query").
    pub fn is_connectivity_questionable(&mut self) -> bool {
        let q = self.questionable_connectivity;
        self.questionable_connectivity = false;
        q
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_reliable(&self) -> bool {
        self.reliable
    }

    pub fn backoff(&self) -> Seconds {
        self.backoff
    }

    pub fn set_max_backoff(&mut self, seconds: Seconds) {
        let seconds = cmp::max(1, seconds);
        self.max_backoff = seconds;
        if self.state == State::Backoff {
            self.backoff = cmp::min(self.backoff, seconds);
        }
    }

    pub fn max_backoff(&self) -> Seconds {
        self.max_backoff
    }

    pub fn seqno(&self) -> u64 {
        self.seqno
    }

    pub fn packets_sent(&self) -> u64 {
        self.packets_sent
    }

    pub fn packets_received(&self) -> u64 {
        self.packets_received
    }

    pub fn n_attempted_connections(&self) -> u64 {
        self.n_attempted_connections
    }

    pub fn n_successful_connections(&self) -> u64 {
        self.n_successful_connections
    }

    pub fn total_time_connected(&self) -> Seconds {
        if self.state.counts_as_connected_uptime() {
            add(self.total_time_connected, sub(self.now(), self.state_entered))
        } else {
            self.total_time_connected
        }
    }

    pub fn creation_time(&self) -> Seconds {
        self.creation_time
    }

    pub fn local_ip(&self) -> Option<IpAddr> {
        self.local_ip
    }

    pub fn remote_ip(&self) -> Option<IpAddr> {
        self.remote_ip
    }

    pub fn remote_port(&self) -> Option<u16> {
        self.remote_port
    }

    pub fn queue_len(&self) -> usize {
        self.txq.len()
    }

    /// A single consistent-snapshot read of every status accessor above,
    /// for callers who want one call instead of a cluster of `get_*`s (see
    /// spec.md §4.6).
    pub fn status(&mut self) -> ConnectionStatus {
        ConnectionStatus {
            state: self.state,
            name: self.name.clone(),
            reliable: self.reliable,
            is_alive: self.is_alive(),
            is_connected: self.is_connected(),
            is_admitted: self.is_admitted(),
            failure_duration: self.failure_duration(),
            is_connectivity_questionable: self.is_connectivity_questionable(),
            backoff: self.backoff,
            max_backoff: self.max_backoff,
            seqno: self.seqno,
            packets_sent: self.packets_sent,
            packets_received: self.packets_received,
            n_attempted_connections: self.n_attempted_connections,
            n_successful_connections: self.n_successful_connections,
            total_time_connected: self.total_time_connected(),
            local_ip: self.local_ip,
            remote_ip: self.remote_ip,
            remote_port: self.remote_port,
            queue_len: self.txq.len(),
            monitor_count: self.monitors.len(),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.flush_queue();
        self.monitors.clear();
    }
}

/// Build a no-op logger for callers that don't otherwise need one.
pub fn discard_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}
