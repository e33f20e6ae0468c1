//! Engine configuration.

use crate::{CoreError, CoreResult};

/// Top-level engine configuration.
///
/// Typically built by the host application (from CLI flags or a settings
/// file with the `serde` feature) and handed to the scheduler, turn protocol
/// and movement resolver at construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Master RNG seed.  The same seed always produces identical resolutions.
    pub seed: u64,

    /// Delay the action-based scheduler uses when no override is set.
    /// Must be finite and strictly positive.  Default: 1.0.
    pub default_action_duration: f64,

    /// How many ticks the turn protocol may auto-skip in a single `step`
    /// before yielding back to the host.  Must be at least 1.
    pub max_auto_skip: u64,

    /// When `false`, movement deadlocks are left unresolved (every agent in
    /// the cycle stays put) instead of asking one agent for a second choice.
    pub deadlock_break_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:                    0,
            default_action_duration: 1.0,
            max_auto_skip:           1_024,
            deadlock_break_enabled:  true,
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.default_action_duration.is_finite() && self.default_action_duration > 0.0) {
            return Err(CoreError::Config(format!(
                "default_action_duration must be finite and > 0, got {}",
                self.default_action_duration
            )));
        }
        if self.max_auto_skip == 0 {
            return Err(CoreError::Config("max_auto_skip must be at least 1".into()));
        }
        Ok(())
    }
}
