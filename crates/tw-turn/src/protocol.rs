//! The turn handshake state machine.

use tracing::debug;

use tw_core::{EngineConfig, Tick};

use crate::{
    ActionOutcome, Phase, PhaseKind, Side, TurnError, TurnObserver, TurnResult, TurnWorld,
};

/// Why [`TurnProtocol::step`] returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The controlled actor's action was rejected.  No time passed and the
    /// protocol is back in `ExpectingInput`.
    Rejected,

    /// `ticks` ticks elapsed and the controlled actor is eligible again.  The
    /// protocol is in `ExpectingInput`.
    AwaitingInput { ticks: u64 },

    /// The auto-skip budget ran out after `ticks` ticks with the controlled
    /// actor still ineligible.  The protocol stays in `ExpectingTurn`; call
    /// `step` again to continue.
    Yielded { ticks: u64 },
}

impl StepOutcome {
    /// Ticks elapsed during the step.
    #[inline]
    pub fn ticks(self) -> u64 {
        match self {
            StepOutcome::Rejected                 => 0,
            StepOutcome::AwaitingInput { ticks }  => ticks,
            StepOutcome::Yielded { ticks }        => ticks,
        }
    }
}

/// Coordinates the controlled actor with the rest of the simulation.
///
/// Owns the shared tick counter.  Nothing else advances it.
#[derive(Clone, Debug)]
pub struct TurnProtocol<A> {
    phase:         Phase<A>,
    tick:          Tick,
    side:          Side,
    max_auto_skip: u64,
}

impl<A> Default for TurnProtocol<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TurnProtocol<A> {
    /// The controlled actor moves first: starts in `ExpectingInput` at tick 0.
    pub fn new() -> Self {
        Self {
            phase:         Phase::ExpectingInput,
            tick:          Tick::ZERO,
            side:          Side::Controlled,
            max_auto_skip: EngineConfig::default().max_auto_skip,
        }
    }

    /// The simulation moves first: starts in `ExpectingTurn` with the
    /// uncontrolled side holding control, so the first `step` runs it
    /// without waiting for input.
    pub fn uncontrolled_first() -> Self {
        Self {
            phase: Phase::ExpectingTurn { pending: None },
            side:  Side::Uncontrolled,
            ..Self::new()
        }
    }

    /// Build from config.  The config is assumed to be validated.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self { max_auto_skip: config.max_auto_skip.max(1), ..Self::new() }
    }

    /// Cap the number of ineligible ticks one `step` will run before
    /// yielding.  Clamped to at least one.
    pub fn with_max_auto_skip(mut self, ticks: u64) -> Self {
        self.max_auto_skip = ticks.max(1);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> &Phase<A> {
        &self.phase
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn max_auto_skip(&self) -> u64 {
        self.max_auto_skip
    }

    #[inline]
    pub fn is_expecting_input(&self) -> bool {
        self.phase.kind() == PhaseKind::ExpectingInput
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Hand the controlled actor's next action to the protocol.
    ///
    /// Only valid in `ExpectingInput`; moves to `ExpectingTurn`.
    pub fn submit(&mut self, action: A) -> TurnResult<()> {
        match self.phase {
            Phase::ExpectingInput => {
                self.phase = Phase::ExpectingTurn { pending: Some(action) };
                Ok(())
            }
            Phase::ExpectingTurn { .. } => Err(TurnError::WrongPhase {
                expected: PhaseKind::ExpectingInput,
                found:    PhaseKind::ExpectingTurn,
            }),
        }
    }

    /// Run simulation logic until input is needed again.
    ///
    /// Only valid in `ExpectingTurn`.  See the crate docs for the loop.
    pub fn step<W, O>(&mut self, world: &mut W, observer: &mut O) -> TurnResult<StepOutcome>
    where
        W: TurnWorld<Action = A>,
        O: TurnObserver,
    {
        let pending = match &mut self.phase {
            Phase::ExpectingTurn { pending } => pending.take(),
            Phase::ExpectingInput => {
                return Err(TurnError::WrongPhase {
                    expected: PhaseKind::ExpectingTurn,
                    found:    PhaseKind::ExpectingInput,
                });
            }
        };

        let (phase, outcome) = self.run(pending, world, observer);
        self.phase = phase;
        Ok(outcome)
    }

    /// One `step` as an explicit transition: consumes the pending action and
    /// returns the next phase alongside the outcome.
    fn run<W, O>(
        &mut self,
        mut pending: Option<A>,
        world:       &mut W,
        observer:    &mut O,
    ) -> (Phase<A>, StepOutcome)
    where
        W: TurnWorld<Action = A>,
        O: TurnObserver,
    {
        let start = self.tick;
        let mut skipped = 0u64;

        loop {
            // ── Controlled side ───────────────────────────────────────────
            if self.side == Side::Controlled {
                if world.controlled_eligible(self.tick) {
                    let Some(action) = pending.take() else {
                        return (Phase::ExpectingInput, StepOutcome::AwaitingInput { ticks: 0 });
                    };
                    if world.execute(action, self.tick) == ActionOutcome::Rejected {
                        debug!(tick = %self.tick, "action rejected");
                        observer.on_action_rejected(self.tick);
                        return (Phase::ExpectingInput, StepOutcome::Rejected);
                    }
                }
                self.side = Side::Uncontrolled;
            }

            // ── Uncontrolled side ─────────────────────────────────────────
            world.run_uncontrolled(self.tick);
            observer.on_tick_end(self.tick);
            self.tick = self.tick.next();
            self.side = Side::Controlled;

            let ticks = self.tick.since(start);
            if world.controlled_eligible(self.tick) {
                if pending.is_some() {
                    debug!(tick = %self.tick, "unconsumed action dropped");
                }
                debug!(tick = %self.tick, ticks, "awaiting input");
                observer.on_awaiting_input(self.tick);
                return (Phase::ExpectingInput, StepOutcome::AwaitingInput { ticks });
            }

            skipped += 1;
            if skipped >= self.max_auto_skip {
                debug!(tick = %self.tick, ticks, "auto-skip budget spent");
                return (Phase::ExpectingTurn { pending }, StepOutcome::Yielded { ticks });
            }
        }
    }
}
