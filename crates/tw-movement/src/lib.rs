//! `tw-movement`: who stands where, and who gets to move this tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`store`]    | `PositionStore` trait, `GridPositions`: injective agent ↔ cell |
//! | [`resolver`] | `MovementResolver`, `DeadlockBreak`, `MoveProposal`, `Move`     |
//! | [`error`]    | `MovementError`, `MovementResult<T>`                            |
//!
//! # Resolution model (summary)
//!
//! Every eligible agent proposes one destination.  Proposals are shuffled,
//! then committed first-fit: any agent whose destination is free *right now*
//! moves, which may free a cell for someone else, so the scan repeats until a
//! pass commits nothing.  Whatever is left is a deadlock (a cycle, or a chain
//! ending in an agent that will not move).  One agent from it gets a single
//! second choice; everyone else stays put until the next tick.
//!
//! The resolver never places two agents on one cell: it only commits into
//! cells the store reports as free.

pub mod error;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{MovementError, MovementResult};
pub use resolver::{DeadlockBreak, Move, MoveProposal, MovementResolver};
pub use store::{GridPositions, PositionStore};
