//! The run driver: owns the lifecycle, never touches a fork or the gate.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use dp_core::{AgentId, AgentRng, Policy, ScenarioConfig, StopToken};
use dp_sync::{ForkRing, TableGate};

use crate::agent::Agent;
use crate::{EngineResult, MetricsCollector, RunObserver, RunReport};

// ── RunPhase ──────────────────────────────────────────────────────────────────

/// Driver lifecycle: `Idle → Initializing → Running → Collecting →
/// Terminating → Idle`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RunPhase {
    Idle = 0,
    Initializing = 1,
    Running = 2,
    Collecting = 3,
    Terminating = 4,
}

/// Shared view of a run's [`RunPhase`].  Clones observe the same run, so a
/// watcher kept from [`RunHandle::phase_cell`] still reads `Idle` after
/// [`RunHandle::stop`] has consumed the handle.
#[derive(Clone)]
pub struct PhaseCell(Arc<AtomicU8>);

impl PhaseCell {
    fn new() -> Self {
        Self(Arc::new(AtomicU8::new(RunPhase::Idle as u8)))
    }

    fn set(&self, phase: RunPhase) {
        self.0.store(phase as u8, Ordering::Release);
    }

    pub fn get(&self) -> RunPhase {
        match self.0.load(Ordering::Acquire) {
            1 => RunPhase::Initializing,
            2 => RunPhase::Running,
            3 => RunPhase::Collecting,
            4 => RunPhase::Terminating,
            _ => RunPhase::Idle,
        }
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Entry point: validates a scenario and spawns a run.
pub struct Simulation;

impl Simulation {
    /// Validate `config`, build the fork ring and (for the arbitrated
    /// policy) the table gate, zero a metrics collector, and spawn one
    /// thread per agent plus an optional checkpoint ticker.
    ///
    /// Configuration errors are returned before any thread exists.
    pub fn start(
        config: ScenarioConfig,
        observer: Arc<dyn RunObserver>,
    ) -> EngineResult<RunHandle> {
        config.validate()?;

        let phase = PhaseCell::new();
        phase.set(RunPhase::Initializing);

        let ring = Arc::new(ForkRing::new(config.agents));
        let gate = match config.policy {
            Policy::Arbitrated => Some(Arc::new(TableGate::for_agents(config.agents))),
            Policy::Naive => None,
        };
        let metrics = Arc::new(MetricsCollector::new(config.agents));
        let stop = StopToken::new();
        let (ack_tx, ack_rx) = mpsc::channel();

        let mut agents = Vec::with_capacity(config.agents);
        for i in 0..config.agents {
            let id = AgentId(i as u32);
            let agent = Agent {
                id,
                ring: Arc::clone(&ring),
                gate: gate.clone(),
                metrics: Arc::clone(&metrics),
                observer: Arc::clone(&observer),
                stop: stop.clone(),
                rng: AgentRng::new(config.seed, id),
                think_time: config.think_time,
                eat_time: config.eat_time,
                acquisition_gap: config.acquisition_gap,
                ack: ack_tx.clone(),
            };
            let spawned = thread::Builder::new()
                .name(format!("agent-{i}"))
                .spawn(move || agent.run());
            match spawned {
                Ok(handle) => agents.push((id, handle)),
                Err(e) => {
                    // Unwind the agents already running before reporting.
                    stop.stop();
                    return Err(e.into());
                }
            }
        }
        drop(ack_tx);

        let ticker = config.checkpoint_every.map(|every| {
            let metrics = Arc::clone(&metrics);
            let observer = Arc::clone(&observer);
            let stop = stop.clone();
            thread::spawn(move || {
                while stop.sleep_for(every) {
                    observer.on_checkpoint(&metrics.snapshot(metrics.elapsed()));
                }
            })
        });

        phase.set(RunPhase::Running);
        Ok(RunHandle {
            config,
            ring,
            metrics,
            observer,
            stop,
            agents,
            ack_rx,
            ticker,
            phase,
        })
    }
}

// ── RunHandle ─────────────────────────────────────────────────────────────────

/// A live run.  Dropping the handle without calling [`stop`][Self::stop]
/// leaves agents running detached; always stop a run you started.
pub struct RunHandle {
    config: ScenarioConfig,
    ring: Arc<ForkRing>,
    metrics: Arc<MetricsCollector>,
    observer: Arc<dyn RunObserver>,
    stop: StopToken,
    agents: Vec<(AgentId, JoinHandle<()>)>,
    ack_rx: mpsc::Receiver<AgentId>,
    ticker: Option<JoinHandle<()>>,
    phase: PhaseCell,
}

impl std::fmt::Debug for RunHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunHandle").finish_non_exhaustive()
    }
}

impl RunHandle {
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn phase(&self) -> RunPhase {
        self.phase.get()
    }

    /// A shared handle on the lifecycle phase; keeps reading after
    /// [`stop`][Self::stop] consumes the run (ending at `Idle`).
    pub fn phase_cell(&self) -> PhaseCell {
        self.phase.clone()
    }

    /// A handle on the fork ring, usable for invariant checks even after
    /// [`stop`][Self::stop] consumes the run (all forks free on teardown).
    pub fn forks(&self) -> Arc<ForkRing> {
        Arc::clone(&self.ring)
    }

    /// Consistent intermediate report; safe to call while agents run.
    pub fn snapshot(&self) -> RunReport {
        self.metrics.snapshot(self.metrics.elapsed())
    }

    /// Sleep out the configured run duration, then [`stop`][Self::stop].
    pub fn run_to_end(self) -> RunReport {
        thread::sleep(self.config.run_for);
        self.stop()
    }

    /// Collect the final report, then tear the run down.
    ///
    /// Collecting happens first so the report reflects the configured run
    /// window, not the teardown tail.  Termination then fires the stop token
    /// and waits up to `stop_grace` for each agent's acknowledgment.  Agents
    /// that miss the deadline are reported through
    /// [`on_stop_timeout`][RunObserver::on_stop_timeout] and detached; this
    /// is a warning, never an error, and the final report is returned
    /// regardless.  A naive-policy run that deadlocked during its window is
    /// not an error either: it unwinds here like any other run and shows up
    /// as low or zero meal counts in the report.
    pub fn stop(mut self) -> RunReport {
        self.phase.set(RunPhase::Collecting);
        let report = self.metrics.snapshot(self.metrics.elapsed());

        self.phase.set(RunPhase::Terminating);
        self.stop.stop();
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.join();
        }

        let deadline = Instant::now() + self.config.stop_grace;
        let mut acked: HashSet<AgentId> = HashSet::with_capacity(self.agents.len());
        while acked.len() < self.agents.len() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.ack_rx.recv_timeout(deadline - now) {
                Ok(id) => {
                    acked.insert(id);
                }
                Err(_) => break,
            }
        }

        for (id, handle) in self.agents.drain(..) {
            if acked.contains(&id) {
                let _ = handle.join();
            } else {
                // Stuck past the grace period; a truly deadlocked agent will
                // never return, so the thread is left detached.
                self.observer.on_stop_timeout(id);
            }
        }

        self.phase.set(RunPhase::Idle);
        self.observer.on_run_end(&report);
        report
    }
}
