//! Sequential builder DSL for declaring machine definitions.

use crate::core::{Control, Event, Metadata, State};
use crate::spec::error::DefinitionError;
use crate::spec::specification::{Specification, TransitionHook};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Builder for declaring a specification state by state.
///
/// Declarations are sequential: [`state`](Self::state) appends a state and
/// makes it the current one, and every following event or hook declaration
/// attaches to it until the next `state` call. Nothing is validated until
/// [`finalize`](Self::finalize), which checks the whole definition and
/// commits it atomically - a definition that fails validation produces no
/// specification at all.
///
/// # Example
///
/// ```rust
/// use flowstate::spec::SpecificationBuilder;
///
/// let mut builder = SpecificationBuilder::<()>::new();
/// builder
///     .state("draft")
///     .event("submit", "review")
///     .on_exit(|_, to, event, _| println!("leaving draft for {to} via {event}"));
/// builder.state("review").event("accept", "published");
/// builder.state("published");
///
/// let spec = builder.finalize()?;
/// assert_eq!(spec.state_names(), vec!["draft", "review", "published"]);
/// # Ok::<(), flowstate::spec::DefinitionError>(())
/// ```
pub struct SpecificationBuilder<H> {
    states: Vec<State<H>>,
    metadata: Metadata,
    on_transition: Option<TransitionHook<H>>,
    error: Option<DefinitionError>,
}

impl<H> SpecificationBuilder<H> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            metadata: Metadata::new(),
            on_transition: None,
            error: None,
        }
    }

    /// Seed a builder with an existing specification's contents.
    ///
    /// Used when a definition is re-opened: the existing states, metadata,
    /// and transition hook carry over, new declarations append, and the
    /// current state starts out as the last state already declared.
    pub fn from_specification(spec: &Specification<H>) -> Self {
        Self {
            states: spec.states().to_vec(),
            metadata: spec.metadata().clone(),
            on_transition: spec.transition_hook().cloned(),
            error: None,
        }
    }

    /// Append a state and make it current.
    pub fn state(&mut self, name: impl Into<String>) -> &mut Self {
        self.state_with(name, Metadata::new())
    }

    /// Append a state with metadata and make it current.
    pub fn state_with(&mut self, name: impl Into<String>, metadata: Metadata) -> &mut Self {
        self.states.push(State::new(name).with_metadata(metadata));
        self
    }

    /// Declare an event on the current state.
    pub fn event(&mut self, name: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.add_event(Event::new(name, target))
    }

    /// Declare an event with an action on the current state.
    pub fn event_with<F>(
        &mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        action: F,
    ) -> &mut Self
    where
        F: Fn(&mut H, &mut Control, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.add_event(Event::new(name, target).with_action(action))
    }

    /// Attach a pre-built event to the current state.
    ///
    /// This is the fully general form: build the event with
    /// [`Event::new`] and attach metadata or an action before adding it.
    pub fn add_event(&mut self, event: Event<H>) -> &mut Self {
        match self.states.last_mut() {
            Some(state) => state.push_event(event),
            None => {
                self.error.get_or_insert(DefinitionError::EventBeforeState {
                    event: event.name().to_string(),
                });
            }
        }
        self
    }

    /// Attach an entry hook to the current state (last write wins).
    pub fn on_entry<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut H, Option<&str>, Option<&str>, &[Value]) + Send + Sync + 'static,
    {
        match self.states.last_mut() {
            Some(state) => state.set_entry_hook(Arc::new(hook)),
            None => {
                self.error.get_or_insert(DefinitionError::HookBeforeState {
                    hook: "on_entry".to_string(),
                });
            }
        }
        self
    }

    /// Attach an exit hook to the current state (last write wins).
    pub fn on_exit<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut H, &str, &str, &[Value]) + Send + Sync + 'static,
    {
        match self.states.last_mut() {
            Some(state) => state.set_exit_hook(Arc::new(hook)),
            None => {
                self.error.get_or_insert(DefinitionError::HookBeforeState {
                    hook: "on_exit".to_string(),
                });
            }
        }
        self
    }

    /// Set the specification-wide transition notification hook.
    ///
    /// Fires on every completed transition regardless of originating
    /// state; last write wins.
    pub fn on_transition<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut H, &str, &str, &str, &[Value]) + Send + Sync + 'static,
    {
        self.on_transition = Some(Arc::new(hook));
        self
    }

    /// Add one metadata entry to the specification.
    pub fn metadata(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Validate the buffered declarations and commit them.
    ///
    /// Reports the first problem found: a declaration made before any
    /// state, an empty definition, duplicate state or event names, or an
    /// event targeting an undeclared state. Target validation happens
    /// here and never at trigger time, so forward references between
    /// states are fine.
    pub fn finalize(self) -> Result<Specification<H>, DefinitionError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        if self.states.is_empty() {
            return Err(DefinitionError::MissingStates);
        }

        let mut names = HashSet::new();
        for state in &self.states {
            if !names.insert(state.name()) {
                return Err(DefinitionError::DuplicateState {
                    name: state.name().to_string(),
                });
            }
        }

        for state in &self.states {
            let mut events = HashSet::new();
            for event in state.events() {
                if !events.insert(event.name()) {
                    return Err(DefinitionError::DuplicateEvent {
                        state: state.name().to_string(),
                        event: event.name().to_string(),
                    });
                }
                if !names.contains(event.target()) {
                    return Err(DefinitionError::UnknownTarget {
                        state: state.name().to_string(),
                        event: event.name().to_string(),
                        target: event.target().to_string(),
                    });
                }
            }
        }

        Ok(Specification::new(
            self.states,
            self.metadata,
            self.on_transition,
        ))
    }
}

impl<H> Default for SpecificationBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
