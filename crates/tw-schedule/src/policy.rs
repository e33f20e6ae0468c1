//! Delay policies: the only behavioural difference between schedulers.
//!
//! | Policy        | Initial delay      | Next-turn delay                      |
//! |---------------|--------------------|--------------------------------------|
//! | `RoundRobin`  | 0                  | 0                                    |
//! | `SpeedBased`  | `1 / speed`        | `1 / speed`, re-read every turn      |
//! | `ActionBased` | default duration   | override if set, else default        |
//!
//! Non-positive or non-finite speeds and durations are rejected with an
//! error instead of being turned into an effectively infinite delay.

use tracing::warn;

use tw_core::EngineConfig;

use crate::{ScheduleError, ScheduleResult};

/// How long a participant waits before its next turn.
pub trait DelayPolicy<P> {
    /// Delay for a participant added without an explicit delay.
    fn initial_delay(&self, participant: &P) -> ScheduleResult<f64>;

    /// Delay for re-enqueueing the participant whose turn just ended.
    ///
    /// Called before the next participant is popped, so the queue never
    /// holds the caller's own upcoming entry while this runs.
    fn next_delay(&self, participant: &P) -> ScheduleResult<f64> {
        self.initial_delay(participant)
    }

    /// Called whenever the turn changes hands (advance, removal of the
    /// current participant, clear).
    fn end_turn(&mut self) {}
}

// ── RoundRobin ────────────────────────────────────────────────────────────────

/// Every delay is zero: participants cycle in stable insertion order.
#[derive(Copy, Clone, Debug, Default)]
pub struct RoundRobin;

impl<P> DelayPolicy<P> for RoundRobin {
    #[inline]
    fn initial_delay(&self, _participant: &P) -> ScheduleResult<f64> {
        Ok(0.0)
    }
}

// ── SpeedBased ────────────────────────────────────────────────────────────────

/// A participant with a speed.  Higher is faster; 1.0 is one turn per time
/// unit.
pub trait Speed {
    fn speed(&self) -> f64;
}

/// Delay is `1 / speed`, read fresh at every enqueue, so a speed change takes
/// effect from the participant's next turn.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpeedBased;

impl<P: Speed> DelayPolicy<P> for SpeedBased {
    fn initial_delay(&self, participant: &P) -> ScheduleResult<f64> {
        let speed = participant.speed();
        let delay = 1.0 / speed;
        if !(speed > 0.0 && delay.is_finite()) {
            warn!(speed, "rejected non-positive or non-finite speed");
            return Err(ScheduleError::InvalidSpeed(speed));
        }
        Ok(delay)
    }
}

// ── ActionBased ───────────────────────────────────────────────────────────────

/// Every turn costs a fixed default duration unless the current participant
/// declares otherwise via
/// [`Scheduler::set_duration`][crate::Scheduler::set_duration].
///
/// The override only ever applies to one re-enqueue: it is consumed by the
/// next `advance`, whether or not the current participant repeats.
#[derive(Clone, Debug)]
pub struct ActionBased {
    default_duration: f64,
    next_duration:    Option<f64>,
}

impl Default for ActionBased {
    fn default() -> Self {
        Self { default_duration: 1.0, next_duration: None }
    }
}

impl ActionBased {
    pub fn new(default_duration: f64) -> ScheduleResult<Self> {
        check_duration(default_duration)?;
        Ok(Self { default_duration, next_duration: None })
    }

    pub fn from_config(config: &EngineConfig) -> ScheduleResult<Self> {
        Self::new(config.default_action_duration)
    }

    #[inline]
    pub fn default_duration(&self) -> f64 {
        self.default_duration
    }

    /// The pending override, if the current participant set one.
    #[inline]
    pub fn pending_duration(&self) -> Option<f64> {
        self.next_duration
    }

    pub(crate) fn set_next_duration(&mut self, duration: f64) -> ScheduleResult<()> {
        check_duration(duration)?;
        self.next_duration = Some(duration);
        Ok(())
    }
}

impl<P> DelayPolicy<P> for ActionBased {
    #[inline]
    fn initial_delay(&self, _participant: &P) -> ScheduleResult<f64> {
        Ok(self.default_duration)
    }

    #[inline]
    fn next_delay(&self, _participant: &P) -> ScheduleResult<f64> {
        Ok(self.next_duration.unwrap_or(self.default_duration))
    }

    #[inline]
    fn end_turn(&mut self) {
        self.next_duration = None;
    }
}

fn check_duration(duration: f64) -> ScheduleResult<()> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        warn!(duration, "rejected non-positive or non-finite action duration");
        Err(ScheduleError::InvalidDuration(duration))
    }
}
