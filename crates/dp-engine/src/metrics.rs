//! Run metrics: one exclusion domain for counters, flags, and status output.
//!
//! The collector owns every counter the reporters print, all behind a single
//! mutex.  Transition events are built — and the observer notified — inside
//! that lock, so a status line can never show an eating-flag snapshot that
//! disagrees with the meal counter printed next to it.  Derived statistics
//! are computed from a snapshot on demand, never stored redundantly.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use dp_core::{AgentAction, AgentId, TransitionEvent};

use crate::RunObserver;

// ── MetricsCollector ──────────────────────────────────────────────────────────

struct Counters {
    attempts: u64,
    successes: u64,
    transitions: u64,
    meals: Vec<u64>,
    eating: Vec<bool>,
}

/// Process-wide (one per run) metrics accumulator.
pub struct MetricsCollector {
    counters: Mutex<Counters>,
    started: Instant,
}

impl MetricsCollector {
    /// A zeroed collector for `agents` agents.
    pub fn new(agents: usize) -> Self {
        Self {
            counters: Mutex::new(Counters {
                attempts: 0,
                successes: 0,
                transitions: 0,
                meals: vec![0; agents],
                eating: vec![false; agents],
            }),
            started: Instant::now(),
        }
    }

    /// Time since the collector was zeroed (run start).
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// An agent entered Hungry and will try to eat.
    pub fn record_attempt(&self) {
        self.lock().attempts += 1;
    }

    /// Record one state change and notify `observer` under the lock.
    ///
    /// Entering `Eating` also counts the meal and the global success;
    /// returning to `Thinking` clears the agent's eating flag.  The returned
    /// event carries the flag snapshot taken at the same instant.
    pub fn record_transition(
        &self,
        agent: AgentId,
        action: AgentAction,
        observer: &dyn RunObserver,
    ) -> TransitionEvent {
        let mut c = self.lock();
        c.transitions += 1;
        match action {
            AgentAction::Eating => {
                c.eating[agent.index()] = true;
                c.meals[agent.index()] += 1;
                c.successes += 1;
            }
            AgentAction::Thinking | AgentAction::DoneEating => {
                c.eating[agent.index()] = false;
            }
            AgentAction::AwaitingSeat
            | AgentAction::TakingLeftFork
            | AgentAction::TakingRightFork => {}
        }
        let event = TransitionEvent {
            elapsed: self.started.elapsed(),
            agent,
            action,
            meals: c.meals[agent.index()],
            eating: c.eating.clone(),
        };
        observer.on_transition(&event);
        event
    }

    /// Internally consistent snapshot: every counter read under one lock
    /// acquisition.  Identical inputs (no intervening activity, same
    /// `elapsed`) yield identical reports.
    pub fn snapshot(&self, elapsed: Duration) -> RunReport {
        let c = self.lock();
        RunReport::derive(
            c.meals.clone(),
            c.attempts,
            c.successes,
            c.transitions,
            elapsed,
        )
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ── RunReport ─────────────────────────────────────────────────────────────────

/// A consistent snapshot plus the statistics derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub per_agent_meals: Vec<u64>,
    pub total_meals: u64,
    pub min_meals: u64,
    pub max_meals: u64,
    /// `(max − min) / mean × 100`; 0 when no meals were recorded.
    pub fairness_spread_pct: f64,
    pub attempts: u64,
    pub successes: u64,
    /// `successes / attempts × 100`; 0 when no attempts were recorded.
    pub success_rate_pct: f64,
    pub transitions: u64,
    /// `transitions / elapsed_seconds`; 0 for a zero-length window.
    pub throughput_per_sec: f64,
    pub elapsed: Duration,
}

impl RunReport {
    fn derive(
        per_agent_meals: Vec<u64>,
        attempts: u64,
        successes: u64,
        transitions: u64,
        elapsed: Duration,
    ) -> Self {
        let total_meals: u64 = per_agent_meals.iter().sum();
        let min_meals = per_agent_meals.iter().copied().min().unwrap_or(0);
        let max_meals = per_agent_meals.iter().copied().max().unwrap_or(0);

        let mean = total_meals as f64 / per_agent_meals.len().max(1) as f64;
        let fairness_spread_pct = if mean > 0.0 {
            (max_meals - min_meals) as f64 / mean * 100.0
        } else {
            0.0
        };
        let success_rate_pct = if attempts > 0 {
            successes as f64 / attempts as f64 * 100.0
        } else {
            0.0
        };
        let secs = elapsed.as_secs_f64();
        let throughput_per_sec = if secs > 0.0 {
            transitions as f64 / secs
        } else {
            0.0
        };

        Self {
            per_agent_meals,
            total_meals,
            min_meals,
            max_meals,
            fairness_spread_pct,
            attempts,
            successes,
            success_rate_pct,
            transitions,
            throughput_per_sec,
            elapsed,
        }
    }

    /// Mean meals per agent.
    pub fn mean_meals(&self) -> f64 {
        self.total_meals as f64 / self.per_agent_meals.len().max(1) as f64
    }
}
