//! `TimeQueue`: a single timeline of relative delays.

use tracing::warn;

use crate::{PriorityQueue, ScheduleError, ScheduleResult};

/// Wraps a [`PriorityQueue`] keyed by delay-from-now and a monotonic clock.
///
/// Stored keys are always relative to `current_time`.  When `next()` pops an
/// entry with delay `d`, the clock moves forward by `d` and every remaining
/// key is shifted by `-d`, so no absolute timestamp is ever stored or
/// rewritten.
///
/// `current_time() + time_of(p)` is the absolute time at which `p` fires.
pub struct TimeQueue<P> {
    current_time: f64,
    heap:         PriorityQueue<P>,
}

impl<P> Default for TimeQueue<P> {
    fn default() -> Self {
        Self { current_time: 0.0, heap: PriorityQueue::new() }
    }
}

impl<P> TimeQueue<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time on this timeline.  Never decreases except via `clear`.
    #[inline]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Schedule `value` to fire `delay` time units from now.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidDelay`] if `delay` is negative or not finite.
    pub fn schedule(&mut self, value: P, delay: f64) -> ScheduleResult<()> {
        if !(delay.is_finite() && delay >= 0.0) {
            warn!(delay, "rejected schedule with invalid delay");
            return Err(ScheduleError::InvalidDelay(delay));
        }
        self.heap.push(value, delay);
        Ok(())
    }

    /// Pop the earliest event, advancing the clock to it.
    ///
    /// Returns `None` if nothing is scheduled.
    pub fn next(&mut self) -> Option<P> {
        if self.heap.is_empty() {
            return None;
        }
        let (delay, value) = self.heap.pop_min().ok()?;
        if delay > 0.0 {
            self.current_time += delay;
            self.heap.shift_all(-delay);
        }
        Some(value)
    }

    /// Drop every pending event and rewind the clock to zero.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.current_time = 0.0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<P: PartialEq> TimeQueue<P> {
    /// Remaining delay until `value` fires, or `None` if it is not queued.
    pub fn time_of(&self, value: &P) -> Option<f64> {
        self.heap.find(value)
    }

    /// Unschedule `value`.  Returns whether it was queued.
    pub fn cancel(&mut self, value: &P) -> bool {
        self.heap.remove(value)
    }
}
