//! The fork ring and its mutual-exclusion discipline.

use std::sync::{Condvar, Mutex, MutexGuard};

use dp_core::{AgentId, ForkId, StopToken};

use crate::{SyncError, SyncResult, STOP_POLL};

// ── Fork ──────────────────────────────────────────────────────────────────────

/// One exclusive-ownership unit.
///
/// The holder field is the mutual-exclusion invariant: at most one agent is
/// recorded as holding the fork at any instant, and the hand-off inside
/// [`acquire`][Fork::acquire] happens entirely under the fork's mutex — there
/// is no intermediate state where two agents both believe they hold it.
pub struct Fork {
    id: ForkId,
    holder: Mutex<Option<AgentId>>,
    freed: Condvar,
}

impl Fork {
    pub fn new(id: ForkId) -> Self {
        Self {
            id,
            holder: Mutex::new(None),
            freed: Condvar::new(),
        }
    }

    pub fn id(&self) -> ForkId {
        self.id
    }

    /// Which agent currently holds the fork, if any.
    pub fn holder(&self) -> Option<AgentId> {
        *self.lock_holder()
    }

    /// Block until the fork is free, then take it for `agent`.
    ///
    /// Returns a [`ForkGuard`] whose drop releases the fork, so release is
    /// guaranteed on every exit path.  While blocked, the stop token is
    /// re-checked each [`STOP_POLL`] quantum; once cancellation is observed
    /// the call returns [`SyncError::Stopped`] without taking the fork.
    ///
    /// Wakeup order among waiters on the same fork is condvar order
    /// (implementation-defined); table-wide liveness comes from the
    /// admission gate, not from per-fork queue fairness.
    pub fn acquire(&self, agent: AgentId, stop: &StopToken) -> SyncResult<ForkGuard<'_>> {
        let mut holder = self.lock_holder();
        loop {
            if stop.is_stopped() {
                return Err(SyncError::Stopped);
            }
            if holder.is_none() {
                *holder = Some(agent);
                return Ok(ForkGuard { fork: self });
            }
            let (guard, _timeout) = self
                .freed
                .wait_timeout(holder, STOP_POLL)
                .unwrap_or_else(|e| e.into_inner());
            holder = guard;
        }
    }

    fn release(&self) {
        let mut holder = self.lock_holder();
        *holder = None;
        // Unblock at most one waiter; the rest keep waiting their turn.
        self.freed.notify_one();
    }

    fn lock_holder(&self) -> MutexGuard<'_, Option<AgentId>> {
        // Holder updates are single assignments, so a poisoned lock (panic
        // on another thread mid-section) still leaves a coherent value.
        self.holder.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ── ForkGuard ─────────────────────────────────────────────────────────────────

/// Scoped ownership of one fork; releases on drop.
#[must_use = "dropping the guard is what releases the fork"]
pub struct ForkGuard<'a> {
    fork: &'a Fork,
}

impl ForkGuard<'_> {
    pub fn id(&self) -> ForkId {
        self.fork.id
    }
}

impl std::fmt::Debug for ForkGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForkGuard").field("id", &self.id()).finish()
    }
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        self.fork.release();
    }
}

// ── ForkRing ──────────────────────────────────────────────────────────────────

/// A fixed ring of N forks.  Agent `i` uses `left(i) = fork i` and
/// `right(i) = fork (i+1) % N`; two adjacent agents share exactly one fork.
pub struct ForkRing {
    forks: Vec<Fork>,
}

impl ForkRing {
    /// Build a ring of `n` free forks.
    pub fn new(n: usize) -> Self {
        let forks = (0..n).map(|i| Fork::new(ForkId(i as u32))).collect();
        Self { forks }
    }

    pub fn len(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// The fork to `agent`'s left (same index).
    pub fn left(&self, agent: AgentId) -> &Fork {
        &self.forks[agent.index() % self.forks.len()]
    }

    /// The fork to `agent`'s right (next index, wrapping).
    pub fn right(&self, agent: AgentId) -> &Fork {
        &self.forks[(agent.index() + 1) % self.forks.len()]
    }

    pub fn fork(&self, id: ForkId) -> &Fork {
        &self.forks[id.index()]
    }

    /// Snapshot of every fork's holder, indexed by fork.
    pub fn holders(&self) -> Vec<Option<AgentId>> {
        self.forks.iter().map(Fork::holder).collect()
    }

    /// `true` when no fork is held — the required state after teardown.
    pub fn all_free(&self) -> bool {
        self.forks.iter().all(|f| f.holder().is_none())
    }
}
