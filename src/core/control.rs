//! The control handle passed to actions while an event is being triggered.

/// Halt signal raised by an action, inspected by the engine after the
/// action returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Halt {
    /// Silent abort: the trigger returns a falsy outcome and the halt
    /// status becomes queryable on the instance.
    Soft { reason: String },
    /// Loud abort: the trigger fails with a typed error carrying the
    /// reason.
    Fatal { reason: String },
}

/// Per-trigger control handle handed to the running action.
///
/// Exposes the names involved in the pending transition and lets the
/// action abort it. Neither [`halt`](Control::halt) nor
/// [`halt_fatal`](Control::halt_fatal) interrupts the action itself: the
/// action runs to completion and the engine acts on the signal afterwards.
/// When both are called, the later call wins.
pub struct Control {
    event: String,
    from: String,
    target: String,
    signal: Option<Halt>,
}

impl Control {
    pub(crate) fn new(event: &str, from: &str, target: &str) -> Self {
        Self {
            event: event.to_string(),
            from: from.to_string(),
            target: target.to_string(),
            signal: None,
        }
    }

    /// Name of the event being triggered.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Name of the state the machine is transitioning from.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Name of the state the machine would transition to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Abort the transition silently.
    ///
    /// The current state is left untouched, the trigger returns a falsy
    /// outcome, and the instance reports `halted()` with this reason until
    /// the next event is triggered.
    pub fn halt(&mut self, reason: impl Into<String>) {
        self.signal = Some(Halt::Soft {
            reason: reason.into(),
        });
    }

    /// Abort the transition with an error.
    ///
    /// The current state is left untouched and the trigger fails with a
    /// typed error carrying this reason.
    pub fn halt_fatal(&mut self, reason: impl Into<String>) {
        self.signal = Some(Halt::Fatal {
            reason: reason.into(),
        });
    }

    /// Whether a halt has been requested so far.
    pub fn is_halted(&self) -> bool {
        self.signal.is_some()
    }

    pub(crate) fn into_signal(self) -> Option<Halt> {
        self.signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_exposes_transition_names() {
        let control = Control::new("ship", "packed", "shipped");

        assert_eq!(control.event(), "ship");
        assert_eq!(control.from(), "packed");
        assert_eq!(control.target(), "shipped");
        assert!(!control.is_halted());
    }

    #[test]
    fn halt_records_soft_signal() {
        let mut control = Control::new("ship", "packed", "shipped");
        control.halt("carrier unavailable");

        assert!(control.is_halted());
        assert_eq!(
            control.into_signal(),
            Some(Halt::Soft {
                reason: "carrier unavailable".to_string()
            })
        );
    }

    #[test]
    fn halt_fatal_records_fatal_signal() {
        let mut control = Control::new("ship", "packed", "shipped");
        control.halt_fatal("no address on file");

        assert_eq!(
            control.into_signal(),
            Some(Halt::Fatal {
                reason: "no address on file".to_string()
            })
        );
    }

    #[test]
    fn later_halt_call_wins() {
        let mut control = Control::new("ship", "packed", "shipped");
        control.halt("first");
        control.halt_fatal("second");

        assert_eq!(
            control.into_signal(),
            Some(Halt::Fatal {
                reason: "second".to_string()
            })
        );

        let mut control = Control::new("ship", "packed", "shipped");
        control.halt_fatal("first");
        control.halt("second");

        assert_eq!(
            control.into_signal(),
            Some(Halt::Soft {
                reason: "second".to_string()
            })
        );
    }
}
