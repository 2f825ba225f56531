//! Coverage/statistics counters.
//!
//! An external sink passed in by the embedder, the way `quinn_proto` reaches
//! its logger through a passed-in `Logger` rather than a process-wide
//! singleton. A connection bumps a named counter whenever it crosses one of
//! the events below; what becomes of that count (exported as a metric,
//! ignored, aggregated) is entirely up to the sink.

/// One event a [`Connection`](crate::connection::Connection) may report for
/// coverage purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageEvent {
    /// A reliable connection attempt failed and the connection entered
    /// `Backoff`.
    ReconnectBackoff,
    /// An inactivity probe (ECHO_REQUEST) was sent.
    ProbeSent,
    /// The send queue was flushed on disconnect; carries the number of
    /// messages discarded.
    QueueFlushed(usize),
    /// The admission heuristic flipped from not-admitted to admitted.
    Admitted,
    /// Connectivity was marked questionable.
    ConnectivityQuestionable,
}

/// A sink for [`CoverageEvent`]s.
///
/// The default, [`NullCoverage`], discards everything; embedders that want
/// metrics wire in their own implementation (e.g. backed by a process-wide
/// counter registry).
pub trait CoverageSink {
    fn record(&mut self, event: CoverageEvent);
}

/// A `CoverageSink` that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCoverage;

impl CoverageSink for NullCoverage {
    fn record(&mut self, _event: CoverageEvent) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every event in order, for test assertions.
    #[derive(Default)]
    pub(crate) struct RecordingCoverage {
        pub events: Vec<CoverageEvent>,
    }

    impl CoverageSink for RecordingCoverage {
        fn record(&mut self, event: CoverageEvent) {
            self.events.push(event);
        }
    }
}
