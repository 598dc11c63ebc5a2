//! `dp-sync` — the blocking primitives agents contend on.
//!
//! Two exclusion domains live here, each behind its own mutex:
//!
//! - [`Fork`] / [`ForkRing`]: N exclusive-ownership units in a ring, agent
//!   `i` using forks `i` (left) and `(i+1) % N` (right).  Acquisition blocks
//!   on a per-fork condvar and returns a [`ForkGuard`] that releases on drop,
//!   so a taken fork cannot leak on any exit path.
//! - [`TableGate`]: the admission arbitrator — a bounded gate of capacity
//!   N−1 that the arbitrated policy passes before touching either fork.
//!   With at most N−1 agents past the gate, at least one agent can always
//!   take both of its forks, so the circular wait needed for deadlock can
//!   never close.
//!
//! Every blocking call observes a [`StopToken`][dp_core::StopToken] and
//! returns [`SyncError::Stopped`] instead of taking the resource once
//! cancellation is requested.

use std::time::Duration;

pub mod error;
pub mod fork;
pub mod gate;

/// How often a blocked waiter re-checks its stop token.  Cancellation of a
/// blocked acquire/admit is best-effort within one of these quanta.
pub(crate) const STOP_POLL: Duration = Duration::from_millis(10);

#[cfg(test)]
mod tests;

pub use error::{SyncError, SyncResult};
pub use fork::{Fork, ForkGuard, ForkRing};
pub use gate::{AdmitGuard, TableGate};
