//! `Scheduler`: turn order over a [`TimeQueue`].

use std::hash::Hash;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::{ActionBased, DelayPolicy, ScheduleError, ScheduleResult, TimeQueue};

/// Decides whose turn it is.
///
/// Holds the time queue, the set of participants that re-enter the queue
/// after each of their turns, and the participant currently holding the
/// turn.  `D` supplies the delays (see [`crate::policy`]).
///
/// # Turn handover
///
/// [`advance`][Self::advance] first re-enqueues the outgoing participant (if
/// it repeats) and only then pops the next one.  This is what makes a
/// participant's own upcoming entry invisible while its next delay is being
/// computed, and what makes zero-delay round-robin cycle fairly.
///
/// Not re-entrant: the host must not call `advance` from inside a turn.
pub struct Scheduler<P, D> {
    queue:   TimeQueue<P>,
    repeat:  FxHashSet<P>,
    current: Option<P>,
    policy:  D,
}

impl<P, D> Scheduler<P, D>
where
    P: Clone + Eq + Hash,
    D: DelayPolicy<P>,
{
    pub fn new(policy: D) -> Self {
        Self {
            queue:   TimeQueue::new(),
            repeat:  FxHashSet::default(),
            current: None,
            policy,
        }
    }

    /// Schedule `participant`.
    ///
    /// With `delay = None` the policy's initial delay is used.  With
    /// `repeat = true` the participant is re-enqueued after every turn until
    /// removed.
    ///
    /// # Errors
    ///
    /// Invalid delays or speeds are rejected before anything is mutated.
    pub fn add(&mut self, participant: P, repeat: bool, delay: Option<f64>) -> ScheduleResult<()> {
        let delay = match delay {
            Some(d) => d,
            None    => self.policy.initial_delay(&participant)?,
        };
        if repeat {
            self.queue.schedule(participant.clone(), delay)?;
            self.repeat.insert(participant);
        } else {
            self.queue.schedule(participant, delay)?;
        }
        Ok(())
    }

    /// Hand the turn to the next participant and return it.
    ///
    /// Returns `Ok(None)` once nothing is scheduled.
    ///
    /// # Errors
    ///
    /// If the policy rejects the outgoing participant's next delay (e.g. its
    /// speed dropped to zero), the error is returned and the scheduler is
    /// left exactly as it was: the same participant still holds the turn.
    pub fn advance(&mut self) -> ScheduleResult<Option<P>> {
        if let Some(prev) = &self.current {
            if self.repeat.contains(prev) {
                let delay = self.policy.next_delay(prev)?;
                self.queue.schedule(prev.clone(), delay)?;
            }
        }
        self.policy.end_turn();
        self.current = self.queue.next();
        trace!(
            time     = self.queue.current_time(),
            queued   = self.queue.len(),
            has_turn = self.current.is_some(),
            "scheduler advanced"
        );
        Ok(self.current.clone())
    }

    /// Remove `participant` from the queue and the repeat set, and take the
    /// turn away from it if it holds it.  Returns whether anything changed.
    pub fn remove(&mut self, participant: &P) -> bool {
        let queued      = self.queue.cancel(participant);
        let repeating   = self.repeat.remove(participant);
        let was_current = self.current.as_ref() == Some(participant);
        if was_current {
            self.current = None;
            self.policy.end_turn();
        }
        queued || repeating || was_current
    }

    /// Drop every participant and rewind the clock.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.repeat.clear();
        self.current = None;
        self.policy.end_turn();
    }

    /// Remaining delay before `participant` acts, relative to [`time`][Self::time].
    ///
    /// The participant holding the turn is not queued until the next
    /// `advance`, so this returns `None` for it.
    pub fn time_of(&self, participant: &P) -> Option<f64> {
        self.queue.time_of(participant)
    }

    /// Elapsed scheduler time.
    #[inline]
    pub fn time(&self) -> f64 {
        self.queue.current_time()
    }

    /// The participant holding the turn.
    #[inline]
    pub fn current(&self) -> Option<&P> {
        self.current.as_ref()
    }

    #[inline]
    pub fn is_repeating(&self, participant: &P) -> bool {
        self.repeat.contains(participant)
    }

    /// Number of queued entries (the current participant is not counted).
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn policy(&self) -> &D {
        &self.policy
    }

    #[inline]
    pub fn policy_mut(&mut self) -> &mut D {
        &mut self.policy
    }
}

impl<P, D> Default for Scheduler<P, D>
where
    P: Clone + Eq + Hash,
    D: DelayPolicy<P> + Default,
{
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<P> Scheduler<P, ActionBased>
where
    P: Clone + Eq + Hash,
{
    /// Declare how long the current participant's action takes.
    ///
    /// Overrides the delay used the next time the current participant is
    /// re-enqueued; afterwards the default applies again.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::NoCurrent`] if nobody holds the turn;
    /// [`ScheduleError::InvalidDuration`] for non-positive durations.
    pub fn set_duration(&mut self, duration: f64) -> ScheduleResult<()> {
        if self.current.is_none() {
            return Err(ScheduleError::NoCurrent);
        }
        self.policy.set_next_duration(duration)
    }
}
