//! Non-error results of triggering an event.

use serde_json::Value;

/// What a trigger call produced when it did not fail.
///
/// A soft halt is deliberately not an error: callers that ignore the
/// outcome simply will not notice it, and have to ask the instance's
/// halt status explicitly.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The transition completed; carries the action's return value
    /// (`Value::Null` when the event has no action).
    Completed(Value),

    /// The action halted the transition silently; the current state is
    /// unchanged.
    Halted,

    /// The trigger name was a state predicate query rather than an
    /// event; no transition was attempted.
    Query(bool),
}

impl Outcome {
    /// The action's return value, if the transition completed.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the transition completed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Whether the transition was halted silently.
    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted)
    }

    /// The answer, if this was a state predicate query.
    pub fn as_query(&self) -> Option<bool> {
        match self {
            Self::Query(answer) => Some(*answer),
            _ => None,
        }
    }
}
