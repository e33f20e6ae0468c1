//! `tw-turn`: the handshake between a human-paced actor and the simulation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`phase`]    | `Phase` (tagged: `ExpectingInput` / `ExpectingTurn`), `Side` |
//! | [`world`]    | `TurnWorld` trait, `ActionOutcome`                         |
//! | [`protocol`] | `TurnProtocol`, `StepOutcome`                              |
//! | [`observer`] | `TurnObserver` trait, `NoopObserver`                       |
//! | [`error`]    | `TurnError`, `TurnResult<T>`                               |
//!
//! # One tick
//!
//! ```text
//! ExpectingInput ──submit(action)──▶ ExpectingTurn
//!
//! step():
//!   ① controlled side eligible?  execute(action)
//!        rejected → ExpectingInput   (tick unchanged, control stays)
//!   ② run_uncontrolled(tick)         (e.g. MovementResolver::resolve)
//!   ③ tick += 1
//!   ④ controlled side eligible at the new tick?
//!        yes → ExpectingInput
//!        no  → back to ② without waiting for input (auto-skip)
//! ```
//!
//! `ExpectingInput` is the only suspension point.  It has no timeout and no
//! cancel: the host leaves it by submitting some action, possibly a no-op
//! "wait".

pub mod error;
pub mod observer;
pub mod phase;
pub mod protocol;
pub mod world;


pub use error::{TurnError, TurnResult};
pub use observer::{NoopObserver, TurnObserver};
pub use phase::{Phase, PhaseKind, Side};
pub use protocol::{StepOutcome, TurnProtocol};
pub use world::{ActionOutcome, TurnWorld};
