use thiserror::Error;
use tw_core::Cell;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MovementError {
    #[error("cell {0} is already occupied")]
    Occupied(Cell),

    #[error("agent is already placed at {0}")]
    AlreadyPlaced(Cell),

    #[error("agent has no position")]
    UnknownAgent,
}

pub type MovementResult<T> = Result<T, MovementError>;
