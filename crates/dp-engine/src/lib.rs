//! `dp-engine` — the resource-allocation and synchronization engine.
//!
//! # Run lifecycle
//!
//! ```text
//! Simulation::start(config, observer)
//!   ① validate config (before any thread spawns)
//!   ② build ForkRing(N) + TableGate(N−1) (arbitrated policy only)
//!   ③ zero the MetricsCollector
//!   ④ spawn N agent threads + optional checkpoint ticker
//!        → RunHandle
//! RunHandle::snapshot()      — live intermediate RunReport
//! RunHandle::run_to_end()    — sleep out the configured duration, then stop
//! RunHandle::stop()
//!   ① Collecting:  final snapshot
//!   ② Terminating: fire the stop token, wait up to stop_grace per agent
//!        for acknowledgment; unresponsive agents (the naive-policy
//!        deadlock signature) are reported via on_stop_timeout and
//!        detached — a warning, never an error
//!        → final RunReport
//! ```
//!
//! Agents cycle Thinking → Hungry → Eating → Thinking until cancelled; the
//! Hungry phase is the only place the two policies differ.  Every transition
//! is recorded by the [`MetricsCollector`] and forwarded to the
//! [`RunObserver`] under the collector's lock, so status output is always
//! consistent with the counters it prints.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dp_core::{Policy, ScenarioConfig};
//! use dp_engine::{NoopObserver, Simulation};
//!
//! let config = ScenarioConfig::new(5, Policy::Arbitrated);
//! let handle = Simulation::start(config, Arc::new(NoopObserver))?;
//! let report = handle.run_to_end();
//! println!("total meals: {}", report.total_meals);
//! ```

mod agent;

pub mod driver;
pub mod error;
pub mod metrics;
pub mod observer;


pub use driver::{PhaseCell, RunHandle, RunPhase, Simulation};
pub use error::{EngineError, EngineResult};
pub use metrics::{MetricsCollector, RunReport};
pub use observer::{NoopObserver, RunObserver};
