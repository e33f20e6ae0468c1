//! `tw-schedule`: priority heap, time queue, and turn schedulers.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                  |
//! |--------------------|-----------------------------------------------------------|
//! | [`priority_queue`] | `PriorityQueue<P>`: binary min-heap, FIFO on equal keys  |
//! | [`time_queue`]     | `TimeQueue<P>`: relative delays over a monotonic clock   |
//! | [`policy`]         | `DelayPolicy`, `RoundRobin`, `SpeedBased`, `ActionBased`  |
//! | [`scheduler`]      | `Scheduler<P, D>`: repeat set + current turn             |
//! | [`error`]          | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Time model (summary)
//!
//! Entries store a delay *relative to now*, never an absolute timestamp.
//! Popping the minimum entry with delay `d` advances the clock by `d` and
//! subtracts `d` from every remaining entry:
//!
//! ```text
//! now = 0   queue: a+0.5  b+1.0
//! next()    → a,  now = 0.5   queue: b+0.5
//! next()    → b,  now = 1.0   queue: (empty)
//! ```
//!
//! Any number of independent timelines can coexist; each `TimeQueue` owns
//! its own clock.

pub mod error;
pub mod policy;
pub mod priority_queue;
pub mod scheduler;
pub mod time_queue;


pub use error::{ScheduleError, ScheduleResult};
pub use policy::{ActionBased, DelayPolicy, RoundRobin, Speed, SpeedBased};
pub use priority_queue::PriorityQueue;
pub use scheduler::Scheduler;
pub use time_queue::TimeQueue;
