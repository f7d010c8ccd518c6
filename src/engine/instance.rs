//! The transition engine: one running machine bound to a host type.

use crate::core::{Control, Halt, Journal, TransitionRecord};
use crate::engine::error::EngineError;
use crate::engine::outcome::Outcome;
use crate::snapshot::Snapshot;
use crate::spec::Specification;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

/// Type alias for the state-change callback.
///
/// Registered with [`Instance::on_state_change`] and invoked with the new
/// state name after every completed transition, once the machine has
/// settled. Persistence-aware hosts use it to write the state name back
/// to storage.
pub type StateChangeHook<H> = Arc<dyn Fn(&mut H, &str) + Send + Sync>;

/// One running machine bound to a host type `H`.
///
/// An instance holds a shared reference to its [`Specification`], the
/// current state, the halt status of the most recent trigger, and a
/// [`Journal`] of completed transitions. It does not hold the host:
/// every [`trigger`](Instance::trigger) call receives the host as an
/// explicit `&mut H`, so hooks and actions can read and write host fields
/// directly and the borrow checker serializes triggers on one instance.
///
/// Machines without a meaningful host use `H = ()` and the
/// [`unbound`](Instance::unbound) constructor.
///
/// # Example
///
/// ```rust
/// use flowstate::engine::Instance;
/// use flowstate::spec::SpecificationBuilder;
/// use std::sync::Arc;
///
/// let mut builder = SpecificationBuilder::new();
/// builder.state("locked").event("coin", "unlocked");
/// builder.state("unlocked").event("push", "locked");
/// let spec = Arc::new(builder.finalize()?);
///
/// let mut machine = Instance::unbound(spec);
/// assert_eq!(machine.state(), "locked");
///
/// machine.trigger_unbound("coin", &[])?;
/// assert!(machine.is("unlocked"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Instance<H> {
    spec: Arc<Specification<H>>,
    current: usize,
    halted: bool,
    halted_because: Option<String>,
    journal: Journal,
    on_state_change: Option<StateChangeHook<H>>,
}

impl<H> Instance<H> {
    /// Construct a fresh instance in the specification's first declared
    /// state.
    ///
    /// The initial state's entry hook fires once, with no predecessor and
    /// no event, and the journal records the initial entry. The
    /// specification-wide transition hook does not fire here - nothing
    /// transitioned.
    pub fn new(spec: Arc<Specification<H>>, host: &mut H) -> Self {
        let mut instance = Self {
            spec,
            current: 0,
            halted: false,
            halted_because: None,
            journal: Journal::new(),
            on_state_change: None,
        };
        instance.enter_initial(host);
        instance
    }

    /// Reconstitute an instance at a previously persisted state.
    ///
    /// The state is set directly: no entry or exit hook fires and the
    /// journal stays empty. Restoring from storage must not replay side
    /// effects meant for live transitions. Fails with
    /// [`EngineError::UnknownState`] when the name is not declared.
    pub fn reconstitute(spec: Arc<Specification<H>>, at: &str) -> Result<Self, EngineError> {
        let current = spec.index_of(at).ok_or_else(|| EngineError::UnknownState {
            name: at.to_string(),
        })?;
        tracing::debug!(state = %at, "reconstituting instance");
        Ok(Self {
            spec,
            current,
            halted: false,
            halted_because: None,
            journal: Journal::new(),
            on_state_change: None,
        })
    }

    /// Reconstitute an instance from a [`Snapshot`], restoring its halt
    /// status and journal along with the state.
    ///
    /// Like [`reconstitute`](Instance::reconstitute), no hooks fire.
    pub fn restore(spec: Arc<Specification<H>>, snapshot: &Snapshot) -> Result<Self, EngineError> {
        let mut instance = Self::reconstitute(spec, &snapshot.state)?;
        instance.halted = snapshot.halted;
        instance.halted_because = snapshot.halted_because.clone();
        instance.journal = snapshot.journal.clone();
        Ok(instance)
    }

    /// Trigger an event on the current state.
    ///
    /// When `event` names an event declared on the current state, the
    /// call runs, in this order:
    ///
    /// 1. halt status from any earlier trigger is cleared;
    /// 2. the event's action runs with the host, a [`Control`] handle,
    ///    and `args` - it may halt the transition;
    /// 3. on a hard halt the call fails with [`EngineError::Halted`], on
    ///    a soft halt it returns [`Outcome::Halted`]; either way the
    ///    current state is untouched and the halt status is queryable;
    /// 4. otherwise the source state's exit hook fires, the current state
    ///    moves to the event's target and is journaled, the
    ///    specification-wide transition hook fires, the target state's
    ///    entry hook fires, and finally the registered state-change
    ///    callback runs with the new state name;
    /// 5. the call returns [`Outcome::Completed`] carrying the action's
    ///    return value (`Value::Null` when the event has no action).
    ///
    /// When `event` is not declared on the current state but has the form
    /// `"name?"` for a declared state `name`, the call answers the
    /// predicate with [`Outcome::Query`] - no transition, and the halt
    /// status of an earlier trigger is left alone. Anything else fails
    /// with [`EngineError::UnrecognizedEvent`].
    pub fn trigger(
        &mut self,
        host: &mut H,
        event: &str,
        args: &[Value],
    ) -> Result<Outcome, EngineError> {
        let from = self.state().to_string();

        let found = self.spec.states()[self.current]
            .event(event)
            .map(|e| (e.target().to_string(), e.action().cloned()));

        let Some((target, action)) = found else {
            if let Some(queried) = event.strip_suffix('?') {
                if self.spec.has_state(queried) {
                    tracing::trace!(state = %from, query = %queried, "answering state predicate");
                    return Ok(Outcome::Query(from == queried));
                }
            }
            return Err(EngineError::UnrecognizedEvent {
                event: event.to_string(),
                state: from,
            });
        };

        // A real dispatch clears halt status left by an earlier trigger.
        self.halted = false;
        self.halted_because = None;

        let mut control = Control::new(event, &from, &target);
        let value = match &action {
            Some(action) => action(host, &mut control, args),
            None => Value::Null,
        };

        match control.into_signal() {
            Some(Halt::Fatal { reason }) => {
                tracing::debug!(event = %event, state = %from, reason = %reason, "transition halted hard");
                self.halted = true;
                self.halted_because = Some(reason.clone());
                Err(EngineError::Halted { reason })
            }
            Some(Halt::Soft { reason }) => {
                tracing::debug!(event = %event, state = %from, reason = %reason, "transition halted");
                self.halted = true;
                self.halted_because = Some(reason);
                Ok(Outcome::Halted)
            }
            None => {
                self.run_transition(host, event, &from, &target, args);
                Ok(Outcome::Completed(value))
            }
        }
    }

    /// Event names declared on the current state, in declaration order.
    pub fn available_events(&self) -> Vec<&str> {
        self.spec.states()[self.current].event_names()
    }

    /// The current state's name.
    pub fn state(&self) -> &str {
        self.spec.states()[self.current].name()
    }

    /// All declared state names, in declaration order.
    pub fn states(&self) -> Vec<&str> {
        self.spec.state_names()
    }

    /// Whether the machine currently sits in the named state.
    ///
    /// Valid for every declared state, visited or not.
    pub fn is(&self, state: &str) -> bool {
        self.state() == state
    }

    /// Whether the current state declares the named event.
    pub fn can_trigger(&self, event: &str) -> bool {
        self.spec.states()[self.current].has_event(event)
    }

    /// Whether a trigger call for `name` would be handled by this
    /// machine, either as an event on the current state or as a state
    /// predicate query.
    ///
    /// This is the delegation test used by
    /// [`binding::dispatch`](crate::binding::dispatch).
    pub fn handles(&self, name: &str) -> bool {
        if self.can_trigger(name) {
            return true;
        }
        name.strip_suffix('?')
            .is_some_and(|queried| self.spec.has_state(queried))
    }

    /// Whether the most recent trigger halted.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// The reason the most recent trigger halted, if it did.
    pub fn halted_because(&self) -> Option<&str> {
        self.halted_because.as_deref()
    }

    /// Whether the current state declares no outgoing events.
    pub fn in_terminal_state(&self) -> bool {
        self.spec.states()[self.current].is_terminal()
    }

    /// The journal of completed transitions.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The specification this instance runs against.
    pub fn specification(&self) -> &Arc<Specification<H>> {
        &self.spec
    }

    /// Register the callback invoked with the new state name after every
    /// completed transition.
    ///
    /// Replaces any previously registered callback.
    pub fn on_state_change<F>(&mut self, callback: F)
    where
        F: Fn(&mut H, &str) + Send + Sync + 'static,
    {
        self.on_state_change = Some(Arc::new(callback));
    }

    /// Capture a serializable snapshot of this instance.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    fn enter_initial(&mut self, host: &mut H) {
        let name = self.spec.initial_state().name().to_string();
        tracing::debug!(state = %name, "entering initial state");
        self.journal = self.journal.record(TransitionRecord {
            from: None,
            to: name,
            event: None,
            at: Utc::now(),
        });
        let entry = self.spec.initial_state().entry_hook().cloned();
        if let Some(hook) = entry {
            hook(host, None, None, &[]);
        }
    }

    fn run_transition(&mut self, host: &mut H, event: &str, from: &str, to: &str, args: &[Value]) {
        let exit = self.spec.states()[self.current].exit_hook().cloned();
        if let Some(hook) = exit {
            hook(host, to, event, args);
        }

        self.current = self
            .spec
            .index_of(to)
            .expect("event targets are validated at finalize");
        self.journal = self.journal.record(TransitionRecord {
            from: Some(from.to_string()),
            to: to.to_string(),
            event: Some(event.to_string()),
            at: Utc::now(),
        });

        let notify = self.spec.transition_hook().cloned();
        if let Some(hook) = notify {
            hook(host, from, to, event, args);
        }

        let entry = self.spec.states()[self.current].entry_hook().cloned();
        if let Some(hook) = entry {
            hook(host, Some(from), Some(event), args);
        }

        tracing::debug!(from = %from, to = %to, event = %event, "transition completed");

        let callback = self.on_state_change.clone();
        if let Some(hook) = callback {
            hook(host, to);
        }
    }
}

impl Instance<()> {
    /// Construct a fresh unbound instance, one with no meaningful host.
    pub fn unbound(spec: Arc<Specification<()>>) -> Self {
        Self::new(spec, &mut ())
    }

    /// Trigger an event on an unbound instance.
    pub fn trigger_unbound(&mut self, event: &str, args: &[Value]) -> Result<Outcome, EngineError> {
        self.trigger(&mut (), event, args)
    }
}
