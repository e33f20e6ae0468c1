//! Protocol phases.

use std::fmt;

/// Which of the two handshake states the protocol is in.
///
/// The pending action lives inside `ExpectingTurn`, so there is no way to
/// hold an action while waiting for input or to step without one having had
/// the chance to arrive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase<A> {
    /// Idle until the host calls `submit`.
    ExpectingInput,

    /// Ready to run synchronous simulation logic.
    ExpectingTurn { pending: Option<A> },
}

impl<A> Phase<A> {
    #[inline]
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::ExpectingInput        => PhaseKind::ExpectingInput,
            Phase::ExpectingTurn { .. }  => PhaseKind::ExpectingTurn,
        }
    }
}

/// Payload-free discriminant of [`Phase`], for errors and logging.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    ExpectingInput,
    ExpectingTurn,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKind::ExpectingInput => f.write_str("ExpectingInput"),
            PhaseKind::ExpectingTurn  => f.write_str("ExpectingTurn"),
        }
    }
}

/// Which side currently has control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// The externally driven actor (usually the player).
    #[default]
    Controlled,
    /// Everything the simulation drives itself.
    Uncontrolled,
}
