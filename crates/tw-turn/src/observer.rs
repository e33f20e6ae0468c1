//! Turn observer trait for progress reporting and UI hooks.

use tw_core::Tick;

/// Callbacks invoked by [`TurnProtocol::step`][crate::TurnProtocol::step].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: message log
///
/// ```rust,ignore
/// struct MessageLog(Vec<String>);
///
/// impl TurnObserver for MessageLog {
///     fn on_action_rejected(&mut self, tick: Tick) {
///         self.0.push(format!("{tick}: you can't do that"));
///     }
/// }
/// ```
pub trait TurnObserver {
    /// The controlled actor's action failed validation at `tick`.
    fn on_action_rejected(&mut self, _tick: Tick) {}

    /// The uncontrolled side finished `tick`; the counter is about to move on.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// The protocol is about to wait for input at `tick`.
    fn on_awaiting_input(&mut self, _tick: Tick) {}
}

/// A [`TurnObserver`] that does nothing.
pub struct NoopObserver;

impl TurnObserver for NoopObserver {}
