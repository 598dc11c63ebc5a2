//! The agent state machine.
//!
//! One agent is one OS thread cycling Thinking → Hungry → Eating → Thinking
//! until its stop token fires.  The two policies differ only inside the
//! Hungry phase:
//!
//! - **Naive**: left fork, then right fork, no admission step.  All N agents
//!   holding their left fork is a circular wait — the demonstrable failure.
//! - **Arbitrated**: pass the table gate first, then left, then right.  The
//!   left-then-right order is the same for every agent; an inconsistent
//!   order would reintroduce a circular-wait path the gate does not cover.
//!
//! Fork and seat ownership are scoped guards, so every exit path — normal
//! completion, cancellation mid-sleep, cancellation while blocked — puts
//! both forks back and departs the gate.  An agent can never terminate while
//! holding anything.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use dp_core::{AgentAction, AgentId, AgentRng, StopToken, TimeRange};
use dp_sync::{ForkRing, SyncError, SyncResult, TableGate};

use crate::{MetricsCollector, RunObserver};

pub(crate) struct Agent {
    pub id: AgentId,
    pub ring: Arc<ForkRing>,
    /// `Some` under the arbitrated policy, `None` under the naive one.
    pub gate: Option<Arc<TableGate>>,
    pub metrics: Arc<MetricsCollector>,
    pub observer: Arc<dyn RunObserver>,
    pub stop: StopToken,
    pub rng: AgentRng,
    pub think_time: TimeRange,
    pub eat_time: TimeRange,
    pub acquisition_gap: Option<Duration>,
    /// Stop acknowledgment, sent exactly once when the loop exits.
    pub ack: mpsc::Sender<AgentId>,
}

impl Agent {
    /// The full agent lifecycle; runs until cancellation is observed at a
    /// suspension point.
    pub(crate) fn run(mut self) {
        loop {
            self.emit(AgentAction::Thinking);
            let think = self.think_time.sample(&mut self.rng);
            if !self.stop.sleep_for(think) {
                break;
            }

            // Entering Hungry.
            self.metrics.record_attempt();
            match self.dine() {
                Ok(()) => {}
                Err(SyncError::Stopped) => break,
            }
        }
        let _ = self.ack.send(self.id);
    }

    /// One Hungry → Eating → done cycle.
    ///
    /// On `Err(Stopped)` every guard taken so far has already been dropped:
    /// forks are back on the table and the seat (if any) is vacated.
    fn dine(&mut self) -> SyncResult<()> {
        let _seat = match &self.gate {
            Some(gate) => {
                self.emit(AgentAction::AwaitingSeat);
                Some(gate.admit(&self.stop)?)
            }
            None => None,
        };

        self.emit(AgentAction::TakingLeftFork);
        let left = self.ring.left(self.id).acquire(self.id, &self.stop)?;

        // Deadlock-demo pacing: hold the left fork for a fixed beat before
        // reaching right, so all N agents can end up one-fork-in-hand.
        if let Some(gap) = self.acquisition_gap {
            if !self.stop.sleep_for(gap) {
                return Err(SyncError::Stopped);
            }
        }

        self.emit(AgentAction::TakingRightFork);
        let right = self.ring.right(self.id).acquire(self.id, &self.stop)?;

        // Entering Eating: the collector counts the meal and the success.
        self.emit(AgentAction::Eating);
        let eat = self.eat_time.sample(&mut self.rng);
        let finished = self.stop.sleep_for(eat);

        // Release right, then left; the seat departs last at scope end.
        drop(right);
        drop(left);
        self.emit(AgentAction::DoneEating);

        if finished {
            Ok(())
        } else {
            Err(SyncError::Stopped)
        }
    }

    fn emit(&self, action: AgentAction) {
        self.metrics
            .record_transition(self.id, action, self.observer.as_ref());
    }
}
