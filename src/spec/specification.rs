//! Finalized machine definitions.

use crate::core::{Metadata, State};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Type alias for the specification-wide transition notification hook.
///
/// Fires on every completed transition with the host, the source and
/// destination state names, the event name, and the trigger arguments.
/// It is a notification only: by the time it runs the transition is
/// already committed and cannot be aborted from here.
pub type TransitionHook<H> = Arc<dyn Fn(&mut H, &str, &str, &str, &[Value]) + Send + Sync>;

/// A finalized, immutable machine definition: ordered states, metadata,
/// and an optional transition notification hook.
///
/// Specifications are produced by
/// [`SpecificationBuilder::finalize`](crate::spec::SpecificationBuilder::finalize),
/// which guarantees the structural invariants every running instance
/// relies on: at least one state, unique state names, unique event names
/// per state, and every event target naming a declared state. Instances
/// share a specification through an [`Arc`], so registering a replacement
/// under the same key never disturbs machines already running against the
/// old definition.
pub struct Specification<H> {
    states: Vec<State<H>>,
    metadata: Metadata,
    on_transition: Option<TransitionHook<H>>,
}

impl<H> Specification<H> {
    pub(crate) fn new(
        states: Vec<State<H>>,
        metadata: Metadata,
        on_transition: Option<TransitionHook<H>>,
    ) -> Self {
        Self {
            states,
            metadata,
            on_transition,
        }
    }

    /// All states in declaration order.
    pub fn states(&self) -> &[State<H>] {
        &self.states
    }

    /// Look up a state by name.
    pub fn state(&self, name: &str) -> Option<&State<H>> {
        self.states.iter().find(|state| state.name() == name)
    }

    /// Position of the named state in declaration order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|state| state.name() == name)
    }

    /// The first declared state, where fresh instances start.
    pub fn initial_state(&self) -> &State<H> {
        // Finalize rejects empty specifications, so index 0 always exists.
        &self.states[0]
    }

    /// State names in declaration order.
    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(State::name).collect()
    }

    /// Whether a state with this name is declared.
    pub fn has_state(&self, name: &str) -> bool {
        self.state(name).is_some()
    }

    /// Names of states declaring no outgoing events.
    pub fn terminal_state_names(&self) -> Vec<&str> {
        self.states
            .iter()
            .filter(|state| state.is_terminal())
            .map(State::name)
            .collect()
    }

    /// Metadata attached to the whole specification.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub(crate) fn transition_hook(&self) -> Option<&TransitionHook<H>> {
        self.on_transition.as_ref()
    }
}

impl<H> Clone for Specification<H> {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
            metadata: self.metadata.clone(),
            on_transition: self.on_transition.as_ref().map(Arc::clone),
        }
    }
}

// Hook closures are opaque, so render the structural fields only.
impl<H> fmt::Debug for Specification<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("states", &self.state_names())
            .field("metadata", &self.metadata)
            .field("has_transition_hook", &self.on_transition.is_some())
            .finish()
    }
}
