//! Position stores: the injective agent ↔ cell mapping movement works on.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use tw_core::Cell;

use crate::{MovementError, MovementResult};

/// The world's answer to "where is everybody?".
///
/// The resolver only ever asks point queries against the live state, so a
/// host can back this with whatever entity storage it already has.
/// Implementations must keep the mapping injective: at most one agent per
/// cell.
pub trait PositionStore {
    type Agent;

    /// Cell currently held by `agent`, or `None` if it is not on the grid.
    fn cell_of(&self, agent: &Self::Agent) -> Option<Cell>;

    /// Agent currently standing on `cell`.
    fn occupant(&self, cell: Cell) -> Option<&Self::Agent>;

    #[inline]
    fn is_occupied(&self, cell: Cell) -> bool {
        self.occupant(cell).is_some()
    }

    /// Move `agent` to `to`, returning the cell it left.
    ///
    /// # Errors
    ///
    /// Must refuse to move into an occupied cell.
    fn relocate(&mut self, agent: &Self::Agent, to: Cell) -> MovementResult<Cell>;
}

/// Two hash maps kept in lockstep: agent → cell and cell → agent.
///
/// Every mutating method either updates both sides or neither, so the
/// mapping stays injective.
pub struct GridPositions<A> {
    by_agent: FxHashMap<A, Cell>,
    by_cell:  FxHashMap<Cell, A>,
}

impl<A> Default for GridPositions<A> {
    fn default() -> Self {
        Self {
            by_agent: FxHashMap::default(),
            by_cell:  FxHashMap::default(),
        }
    }
}

impl<A: Clone + Eq + Hash> GridPositions<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `agent` on the grid for the first time.
    pub fn place(&mut self, agent: A, cell: Cell) -> MovementResult<()> {
        if let Some(&at) = self.by_agent.get(&agent) {
            return Err(MovementError::AlreadyPlaced(at));
        }
        if self.by_cell.contains_key(&cell) {
            return Err(MovementError::Occupied(cell));
        }
        self.by_cell.insert(cell, agent.clone());
        self.by_agent.insert(agent, cell);
        Ok(())
    }

    /// Take `agent` off the grid, returning the cell it held.
    pub fn remove(&mut self, agent: &A) -> Option<Cell> {
        let cell = self.by_agent.remove(agent)?;
        self.by_cell.remove(&cell);
        Some(cell)
    }

    /// Iterate `(agent, cell)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&A, Cell)> {
        self.by_agent.iter().map(|(a, &c)| (a, c))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_agent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_agent.is_empty()
    }

    /// `true` if both maps describe the same one-to-one mapping.
    pub fn is_consistent(&self) -> bool {
        self.by_agent.len() == self.by_cell.len()
            && self
                .by_agent
                .iter()
                .all(|(a, c)| self.by_cell.get(c) == Some(a))
    }
}

impl<A: Clone + Eq + Hash> PositionStore for GridPositions<A> {
    type Agent = A;

    #[inline]
    fn cell_of(&self, agent: &A) -> Option<Cell> {
        self.by_agent.get(agent).copied()
    }

    #[inline]
    fn occupant(&self, cell: Cell) -> Option<&A> {
        self.by_cell.get(&cell)
    }

    fn relocate(&mut self, agent: &A, to: Cell) -> MovementResult<Cell> {
        let from = self.cell_of(agent).ok_or(MovementError::UnknownAgent)?;
        if from == to {
            return Ok(from);
        }
        if self.by_cell.contains_key(&to) {
            return Err(MovementError::Occupied(to));
        }
        self.by_cell.remove(&from);
        self.by_cell.insert(to, agent.clone());
        self.by_agent.insert(agent.clone(), to);
        Ok(from)
    }
}
