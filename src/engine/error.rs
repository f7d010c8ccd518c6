//! Errors raised by the transition engine.

use thiserror::Error;

/// Errors raised by [`Instance`](crate::engine::Instance) operations.
///
/// `Halted` is the engine's only control-flow error: it surfaces a hard
/// halt raised by an action. Errors raised inside user hook or action
/// code are not translated - they propagate as panics, untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An action aborted the transition loudly; the current state is
    /// unchanged.
    #[error("Transition halted: {reason}")]
    Halted { reason: String },

    /// The trigger name is neither an event on the current state nor a
    /// valid state predicate query.
    #[error("No event '{event}' is defined for the '{state}' state")]
    UnrecognizedEvent { event: String, state: String },

    /// Reconstitution was requested at a name the specification does not
    /// declare.
    #[error("No state named '{name}' is declared")]
    UnknownState { name: String },
}
