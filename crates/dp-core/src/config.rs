//! Scenario configuration.
//!
//! The engine is one parameterized state machine; everything that varies
//! between scenarios (agent count, think/eat intervals, run length,
//! checkpoint cadence) lives here.  Scenario binaries build a
//! `ScenarioConfig` and hand it to the driver; nothing in the engine is
//! hard-coded to a particular table size or timing.

use std::time::Duration;

use crate::rng::AgentRng;
use crate::ConfigError;

// ── TimeRange ─────────────────────────────────────────────────────────────────

/// A closed interval `[min, max]` of durations, sampled uniformly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRange {
    pub min: Duration,
    pub max: Duration,
}

impl TimeRange {
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// Convenience constructor from millisecond bounds.
    pub const fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    /// A closed interval is empty when its bounds are inverted or when it
    /// tops out at zero, leaving nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max || self.max.is_zero()
    }

    /// Draw a duration uniformly from `[min, max]` (inclusive on both ends).
    pub fn sample(&self, rng: &mut AgentRng) -> Duration {
        let lo = self.min.as_nanos() as u64;
        let hi = self.max.as_nanos() as u64;
        Duration::from_nanos(rng.gen_range(lo..=hi))
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

/// Which acquisition discipline the agents follow while Hungry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Policy {
    /// Left fork, then right fork, no admission step.  Can deadlock: all N
    /// agents holding their left fork is a circular wait.
    Naive,
    /// Pass the table's admission gate (capacity N−1) before touching either
    /// fork.  Structurally deadlock-free.
    Arbitrated,
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Top-level run configuration, validated before any thread spawns.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    /// Number of agents (and forks).  Must be ≥ 2.
    pub agents: usize,

    /// Acquisition policy for the Hungry phase.
    pub policy: Policy,

    /// How long an agent thinks between meals, drawn uniformly per cycle.
    pub think_time: TimeRange,

    /// How long a meal takes, drawn uniformly per cycle.
    pub eat_time: TimeRange,

    /// Wall-clock length of the run.
    pub run_for: Duration,

    /// Emit an intermediate report every this often.  `None` disables
    /// checkpoints.
    pub checkpoint_every: Option<Duration>,

    /// Fixed pause between picking up the left and right fork.  The deadlock
    /// demo sets this under the naive policy to make the circular wait likely
    /// within a short run; it is not required for deadlock to be possible.
    pub acquisition_gap: Option<Duration>,

    /// How long `stop()` waits for each agent to acknowledge cancellation
    /// before giving up on it (a stalled naive-policy agent never acks).
    pub stop_grace: Duration,

    /// Master RNG seed.  The same seed produces the same think/eat draws.
    pub seed: u64,
}

impl ScenarioConfig {
    /// A baseline five-seat table; scenario binaries override what differs.
    pub fn new(agents: usize, policy: Policy) -> Self {
        Self {
            agents,
            policy,
            think_time: TimeRange::from_millis(500, 900),
            eat_time: TimeRange::from_millis(2_000, 3_000),
            run_for: Duration::from_secs(10),
            checkpoint_every: None,
            acquisition_gap: None,
            stop_grace: Duration::from_millis(500),
            seed: 42,
        }
    }

    /// Reject configurations that cannot produce a valid run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents < 2 {
            return Err(ConfigError::TooFewAgents(self.agents));
        }
        for (what, range) in [("think", &self.think_time), ("eat", &self.eat_time)] {
            if range.is_empty() {
                return Err(ConfigError::EmptyInterval {
                    what,
                    min_ms: range.min.as_millis(),
                    max_ms: range.max.as_millis(),
                });
            }
        }
        if self.run_for.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }

    // ── Builder-style overrides ───────────────────────────────────────────

    pub fn think_time(mut self, range: TimeRange) -> Self {
        self.think_time = range;
        self
    }

    pub fn eat_time(mut self, range: TimeRange) -> Self {
        self.eat_time = range;
        self
    }

    pub fn run_for(mut self, d: Duration) -> Self {
        self.run_for = d;
        self
    }

    pub fn checkpoint_every(mut self, d: Duration) -> Self {
        self.checkpoint_every = Some(d);
        self
    }

    pub fn acquisition_gap(mut self, d: Duration) -> Self {
        self.acquisition_gap = Some(d);
        self
    }

    pub fn stop_grace(mut self, d: Duration) -> Self {
        self.stop_grace = d;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
