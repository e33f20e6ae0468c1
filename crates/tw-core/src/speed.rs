//! Speed tiers: the default "who may act this tick" predicate.
//!
//! The turn protocol and the movement resolver only consume eligibility as a
//! boolean; hosts are free to gate on anything.  `SpeedTier` is the stock
//! predicate:
//!
//! | Tier     | Acts on        | Moves per tick |
//! |----------|----------------|----------------|
//! | `Slow`   | even ticks     | 1              |
//! | `Normal` | every tick     | 1              |
//! | `Fast`   | every tick     | 2              |

use crate::Tick;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedTier {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedTier {
    /// Is an actor of this tier eligible to act on `tick`?
    #[inline]
    pub fn acts_on(self, tick: Tick) -> bool {
        match self {
            SpeedTier::Slow => tick.is_even(),
            SpeedTier::Normal | SpeedTier::Fast => true,
        }
    }

    /// How many movement resolutions an actor of this tier takes part in per
    /// eligible tick.
    #[inline]
    pub fn moves_per_tick(self) -> u32 {
        match self {
            SpeedTier::Fast => 2,
            SpeedTier::Slow | SpeedTier::Normal => 1,
        }
    }

    /// Relative speed for the speed-based scheduler (`Normal` = 1.0).
    #[inline]
    pub fn relative_speed(self) -> f64 {
        match self {
            SpeedTier::Slow => 0.5,
            SpeedTier::Normal => 1.0,
            SpeedTier::Fast => 2.0,
        }
    }
}
