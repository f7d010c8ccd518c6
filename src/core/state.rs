//! State declarations: named nodes owning ordered events and lifecycle hooks.

use super::event::Event;
use super::Metadata;
use serde_json::Value;
use std::sync::Arc;

/// Type alias for state entry hooks.
///
/// Fires after the machine has settled into this state. The second and
/// third parameters are the predecessor state name and the triggering
/// event name; both are `None` when the machine enters its initial state
/// at construction, which is the only entry without a predecessor.
pub type EntryHook<H> = Arc<dyn Fn(&mut H, Option<&str>, Option<&str>, &[Value]) + Send + Sync>;

/// Type alias for state exit hooks.
///
/// Fires before the machine leaves this state, receiving the destination
/// state name and the triggering event name.
pub type ExitHook<H> = Arc<dyn Fn(&mut H, &str, &str, &[Value]) + Send + Sync>;

/// A named node in a machine, owning its outgoing events in declaration
/// order plus optional entry/exit hooks and metadata.
///
/// States are built exclusively through
/// [`SpecificationBuilder`](crate::spec::SpecificationBuilder) and are
/// immutable once their specification is finalized. Event names are unique
/// within a state; the builder rejects duplicates.
pub struct State<H> {
    name: String,
    events: Vec<Event<H>>,
    metadata: Metadata,
    on_entry: Option<EntryHook<H>>,
    on_exit: Option<ExitHook<H>>,
}

impl<H> State<H> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
            metadata: Metadata::new(),
            on_entry: None,
            on_exit: None,
        }
    }

    pub(crate) fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The state's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Events declared on this state, in declaration order.
    pub fn events(&self) -> &[Event<H>] {
        &self.events
    }

    /// Look up an event by name.
    pub fn event(&self, name: &str) -> Option<&Event<H>> {
        self.events.iter().find(|event| event.name() == name)
    }

    /// Whether an event with this name is declared here.
    pub fn has_event(&self, name: &str) -> bool {
        self.event(name).is_some()
    }

    /// Event names in declaration order.
    pub fn event_names(&self) -> Vec<&str> {
        self.events.iter().map(Event::name).collect()
    }

    /// Metadata attached to this state.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// A terminal state declares no outgoing events.
    pub fn is_terminal(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn push_event(&mut self, event: Event<H>) {
        self.events.push(event);
    }

    pub(crate) fn set_entry_hook(&mut self, hook: EntryHook<H>) {
        self.on_entry = Some(hook);
    }

    pub(crate) fn set_exit_hook(&mut self, hook: ExitHook<H>) {
        self.on_exit = Some(hook);
    }

    pub(crate) fn entry_hook(&self) -> Option<&EntryHook<H>> {
        self.on_entry.as_ref()
    }

    pub(crate) fn exit_hook(&self) -> Option<&ExitHook<H>> {
        self.on_exit.as_ref()
    }
}

impl<H> Clone for State<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            events: self.events.clone(),
            metadata: self.metadata.clone(),
            on_entry: self.on_entry.as_ref().map(Arc::clone),
            on_exit: self.on_exit.as_ref().map(Arc::clone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_state_is_terminal() {
        let state: State<()> = State::new("done");

        assert_eq!(state.name(), "done");
        assert!(state.is_terminal());
        assert!(state.events().is_empty());
    }

    #[test]
    fn events_keep_declaration_order() {
        let mut state: State<()> = State::new("editing");
        state.push_event(Event::new("save", "saved"));
        state.push_event(Event::new("discard", "empty"));

        assert_eq!(state.event_names(), vec!["save", "discard"]);
        assert!(!state.is_terminal());
    }

    #[test]
    fn event_lookup_finds_declared_events() {
        let mut state: State<()> = State::new("editing");
        state.push_event(Event::new("save", "saved"));

        assert!(state.has_event("save"));
        assert!(!state.has_event("publish"));
        assert_eq!(state.event("save").map(Event::target), Some("saved"));
    }

    #[test]
    fn hooks_are_stored() {
        let mut state: State<Vec<String>> = State::new("review");
        state.set_entry_hook(Arc::new(|host: &mut Vec<String>, _, _, _| {
            host.push("entered".to_string());
        }));

        assert!(state.entry_hook().is_some());
        assert!(state.exit_hook().is_none());
    }

    #[test]
    fn clone_preserves_events_and_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("stage".to_string(), json!("early"));

        let mut state: State<()> = State::new("draft").with_metadata(metadata);
        state.push_event(Event::new("submit", "review"));

        let cloned = state.clone();
        assert_eq!(cloned.name(), "draft");
        assert_eq!(cloned.event_names(), vec!["submit"]);
        assert_eq!(cloned.metadata().get("stage"), Some(&json!("early")));
    }
}
