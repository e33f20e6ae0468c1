use thiserror::Error;

use crate::PhaseKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    /// `submit` or `step` called in the wrong phase.  The host and the engine
    /// disagree about whose move it is.
    #[error("expected phase {expected}, but the protocol is in {found}")]
    WrongPhase {
        expected: PhaseKind,
        found:    PhaseKind,
    },
}

pub type TurnResult<T> = Result<T, TurnError>;
