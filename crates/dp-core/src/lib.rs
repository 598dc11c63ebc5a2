//! `dp-core` — foundational types for the dining-philosophers laboratory.
//!
//! This crate is a dependency of every other `dp-*` crate.  It intentionally
//! has no `dp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `ForkId`                                    |
//! | [`config`]  | `ScenarioConfig`, `TimeRange`, `Policy`                |
//! | [`event`]   | `AgentState`, `AgentAction`, `TransitionEvent`         |
//! | [`rng`]     | `AgentRng` (per-agent deterministic RNG)               |
//! | [`stop`]    | `StopToken` (cooperative cancellation)                 |
//! | [`error`]   | `ConfigError`                                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod rng;
pub mod stop;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Policy, ScenarioConfig, TimeRange};
pub use error::ConfigError;
pub use event::{AgentAction, AgentState, TransitionEvent};
pub use ids::{AgentId, ForkId};
pub use rng::AgentRng;
pub use stop::StopToken;
