//! Simultaneous-move resolution for one tick.

use tracing::{debug, trace};

use tw_core::{Cell, EngineConfig, Shuffle};

use crate::PositionStore;

/// What to do with agents still blocked after relaxation.
///
/// Neither variant is a general cycle solver.  `FirstFitThenGiveUp` frees at
/// most one agent per tick; a tick never runs a second relaxation pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DeadlockBreak {
    /// Ask the first blocked agent (in shuffle order) for a second choice
    /// that avoids its contested cell, commit it if free, and leave every
    /// other blocked agent where it is.
    #[default]
    FirstFitThenGiveUp,

    /// Leave every blocked agent where it is.
    StayPut,
}

/// One agent's requested destination for this tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveProposal<A> {
    pub agent:       A,
    pub destination: Cell,
}

/// A committed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move<A> {
    pub agent: A,
    pub from:  Cell,
    pub to:    Cell,
}

/// Resolves a batch of proposed moves against a shared [`PositionStore`].
///
/// Stateless between calls: each [`resolve`][Self::resolve] reads the store
/// as it is at that moment.
#[derive(Copy, Clone, Debug, Default)]
pub struct MovementResolver {
    pub deadlock_break: DeadlockBreak,
}

impl MovementResolver {
    pub fn new(deadlock_break: DeadlockBreak) -> Self {
        Self { deadlock_break }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let deadlock_break = if config.deadlock_break_enabled {
            DeadlockBreak::FirstFitThenGiveUp
        } else {
            DeadlockBreak::StayPut
        };
        Self { deadlock_break }
    }

    /// Move every agent in `agents` that can move this tick.
    ///
    /// `propose(store, agent, excluded)` is the agents' movement policy: it
    /// returns where `agent` wants to go, or `None` to stay.  It is called
    /// once per agent with `excluded = None`, and at most once more for a
    /// single deadlocked agent with `excluded = Some(contested_cell)`.
    ///
    /// `rng` only decides the order in which conflicts are settled.
    ///
    /// Returns the committed moves in commit order.  Agents that could not
    /// move are simply absent; that is not an error.
    pub fn resolve<S, F, R>(
        &self,
        store:       &mut S,
        agents:      &[S::Agent],
        mut propose: F,
        rng:         &mut R,
    ) -> Vec<Move<S::Agent>>
    where
        S: PositionStore,
        S::Agent: Clone,
        F: FnMut(&S, &S::Agent, Option<Cell>) -> Option<Cell>,
        R: Shuffle,
    {
        // ── 1. Collect proposals ──────────────────────────────────────────
        let mut pending: Vec<MoveProposal<S::Agent>> = Vec::with_capacity(agents.len());
        for agent in agents {
            if store.cell_of(agent).is_none() {
                continue;
            }
            if let Some(destination) = propose(&*store, agent, None) {
                pending.push(MoveProposal { agent: agent.clone(), destination });
            }
        }
        let proposed = pending.len();

        // ── 2. Randomise conflict order ───────────────────────────────────
        rng.shuffle(&mut pending);

        // ── 3. Relaxation to a fixed point ────────────────────────────────
        //
        // A move committed early in a pass vacates a cell that later entries
        // in the same pass can take, so chains resolve in at most N passes.
        let mut moves = Vec::with_capacity(pending.len());
        let mut passes = 0u32;
        while !pending.is_empty() {
            passes += 1;
            let before = pending.len();
            pending.retain(|p| !try_commit(store, &p.agent, p.destination, &mut moves));
            if pending.len() == before {
                break;
            }
        }

        // ── 4. One-shot deadlock break ────────────────────────────────────
        if let Some(first) = pending.first() {
            if self.deadlock_break == DeadlockBreak::FirstFitThenGiveUp {
                let second = propose(&*store, &first.agent, Some(first.destination));
                let broken = second
                    .is_some_and(|cell| try_commit(store, &first.agent, cell, &mut moves));
                trace!(broken, blocked = pending.len(), "deadlock break attempted");
            }
        }

        debug!(
            proposed,
            moved   = moves.len(),
            stalled = proposed - moves.len(),
            passes,
            "movement resolved"
        );
        moves
    }
}

/// Commit `agent → to` if `to` is free right now.
fn try_commit<S>(store: &mut S, agent: &S::Agent, to: Cell, moves: &mut Vec<Move<S::Agent>>) -> bool
where
    S: PositionStore,
    S::Agent: Clone,
{
    if store.is_occupied(to) {
        return false;
    }
    match store.relocate(agent, to) {
        Ok(from) => {
            moves.push(Move { agent: agent.clone(), from, to });
            true
        }
        Err(e) => {
            trace!(error = %e, %to, "relocation refused");
            false
        }
    }
}
