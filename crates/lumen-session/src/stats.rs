use serde::Serialize;

/// Counters describing what the scheduler has done since the session started.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub runs_started: u64,
    pub runs_completed: u64,
    pub runs_failed: u64,
    /// Runs that finished after their image was replaced, reset or closed.
    pub runs_discarded: u64,
    /// Triggers that arrived while a run was in flight and were not run.
    pub triggers_dropped: u64,
    /// Triggers folded into a follow-up run under the queue-latest policy.
    pub triggers_coalesced: u64,
    pub last_run_ms: Option<u64>,
}
