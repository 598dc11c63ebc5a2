//! Run observer trait for status reporting and data collection.

use dp_core::{AgentId, TransitionEvent};

use crate::RunReport;

/// Callbacks invoked by the engine at key points in a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Methods take `&self` because they are
/// called concurrently from agent threads — implementors needing mutable
/// state use interior mutability (the console reporter serializes through
/// stdout's own lock).
///
/// `on_transition` is invoked while the metrics lock is held, which is what
/// keeps printed status lines consistent with the counters they show.
/// Implementations must therefore be brief and must never call back into
/// the engine.
pub trait RunObserver: Send + Sync {
    /// One agent changed state.  Called under the metrics lock.
    fn on_transition(&self, _event: &TransitionEvent) {}

    /// Periodic intermediate report (only when `checkpoint_every` is set).
    fn on_checkpoint(&self, _report: &RunReport) {}

    /// An agent failed to acknowledge cancellation within the grace period.
    /// Non-fatal: the run still produces its final report with the agent's
    /// thread left detached.
    fn on_stop_timeout(&self, _agent: AgentId) {}

    /// The final report, after teardown completes.
    fn on_run_end(&self, _report: &RunReport) {}
}

/// A [`RunObserver`] that does nothing.  Use when you need to start a run
/// but don't want callbacks.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
