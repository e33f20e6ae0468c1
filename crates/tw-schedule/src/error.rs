use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    /// `pop_min` on an empty heap.  Callers must check `is_empty` first.
    #[error("pop from an empty priority queue")]
    EmptyQueue,

    #[error("delay must be finite and >= 0, got {0}")]
    InvalidDelay(f64),

    #[error("speed must be finite and > 0, got {0}")]
    InvalidSpeed(f64),

    #[error("action duration must be finite and > 0, got {0}")]
    InvalidDuration(f64),

    /// `set_duration` called while no participant holds the turn.
    #[error("no participant currently holds the turn")]
    NoCurrent,
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
