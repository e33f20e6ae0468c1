//! The world as the turn protocol sees it.

use tw_core::Tick;

/// Result of applying the controlled actor's action.
///
/// A rejected action is an ordinary outcome, not an error: the protocol
/// re-prompts without spending the turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Accepted,
    Rejected,
}

impl ActionOutcome {
    #[inline]
    pub fn is_accepted(self) -> bool {
        self == ActionOutcome::Accepted
    }
}

impl From<bool> for ActionOutcome {
    #[inline]
    fn from(ok: bool) -> Self {
        if ok { ActionOutcome::Accepted } else { ActionOutcome::Rejected }
    }
}

/// Callbacks the protocol drives.  Implemented by the host's world type.
///
/// # Example
///
/// ```rust,ignore
/// impl TurnWorld for Dungeon {
///     type Action = Command;
///
///     fn controlled_eligible(&self, tick: Tick) -> bool {
///         self.player_tier.acts_on(tick)
///     }
///
///     fn execute(&mut self, action: Command, _tick: Tick) -> ActionOutcome {
///         self.apply_player(action).into()
///     }
///
///     fn run_uncontrolled(&mut self, tick: Tick) {
///         let movers = self.monsters_acting_on(tick);
///         self.resolver.resolve(&mut self.positions, &movers, chase, &mut self.rng);
///     }
/// }
/// ```
pub trait TurnWorld {
    type Action;

    /// May the controlled actor act on `tick`?
    fn controlled_eligible(&self, tick: Tick) -> bool;

    /// Validate and apply the controlled actor's action.
    ///
    /// Must leave the world unchanged when returning `Rejected`.
    fn execute(&mut self, action: Self::Action, tick: Tick) -> ActionOutcome;

    /// Run one full step of the uncontrolled side.
    fn run_uncontrolled(&mut self, tick: Tick);
}
