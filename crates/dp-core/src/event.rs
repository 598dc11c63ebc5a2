//! Agent states, action labels, and the transition event surface.
//!
//! The engine emits one [`TransitionEvent`] per observable agent action.
//! Reporters render these into status lines; the metrics collector builds
//! them inside its own lock so the flag snapshot is always consistent with
//! the counters printed next to it.

use std::fmt;
use std::time::Duration;

use crate::AgentId;

// ── AgentState ────────────────────────────────────────────────────────────────

/// The three coarse states of the agent cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    Thinking,
    Hungry,
    Eating,
}

// ── AgentAction ───────────────────────────────────────────────────────────────

/// Fine-grained action labels, one per status line the reporters print.
///
/// `Hungry` is not a single action: the status stream distinguishes waiting
/// for a seat from reaching for each fork, since that is where the two
/// policies diverge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentAction {
    Thinking,
    AwaitingSeat,
    TakingLeftFork,
    TakingRightFork,
    Eating,
    DoneEating,
}

impl AgentAction {
    /// The coarse state this action belongs to.
    pub fn state(self) -> AgentState {
        match self {
            AgentAction::Thinking | AgentAction::DoneEating => AgentState::Thinking,
            AgentAction::AwaitingSeat
            | AgentAction::TakingLeftFork
            | AgentAction::TakingRightFork => AgentState::Hungry,
            AgentAction::Eating => AgentState::Eating,
        }
    }

    /// Human-readable label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            AgentAction::Thinking => "THINKING",
            AgentAction::AwaitingSeat => "HUNGRY - awaiting seat",
            AgentAction::TakingLeftFork => "HUNGRY - taking left fork",
            AgentAction::TakingRightFork => "HUNGRY - taking right fork",
            AgentAction::Eating => "EATING",
            AgentAction::DoneEating => "DONE EATING",
        }
    }
}

impl fmt::Display for AgentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── TransitionEvent ───────────────────────────────────────────────────────────

/// One observable state change, snapshotted under the metrics lock.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionEvent {
    /// Time since run start.
    pub elapsed: Duration,
    /// The agent that transitioned.
    pub agent: AgentId,
    /// What it did.
    pub action: AgentAction,
    /// The agent's meal count after this transition.
    pub meals: u64,
    /// Per-agent eating flags at the instant of the transition
    /// (`eating[i] == true` ⇔ agent `i` is mid-meal).
    pub eating: Vec<bool>,
}
