//! Event declarations: named transition edges between states.

use super::control::Control;
use super::Metadata;
use serde_json::Value;
use std::sync::Arc;

/// Type alias for event action closures.
///
/// An action runs while its event is being triggered, before any state
/// changes. It receives the bound host, a [`Control`] handle for halting
/// the transition, and the arguments passed to the trigger call. Its
/// return value becomes the trigger's completion value.
pub type Action<H> = Arc<dyn Fn(&mut H, &mut Control, &[Value]) -> Value + Send + Sync>;

/// A named transition edge declared on a state.
///
/// Events are immutable once built: construct one with [`Event::new`],
/// optionally attach metadata and an action, and hand it to the builder.
/// The target is a state name that must be declared somewhere in the same
/// specification; the builder verifies this when the specification is
/// finalized.
///
/// # Example
///
/// ```rust
/// use flowstate::core::Event;
/// use serde_json::json;
///
/// let submit: Event<()> = Event::new("submit", "review")
///     .with_action(|_, _, _| json!("submitted"));
///
/// assert_eq!(submit.name(), "submit");
/// assert_eq!(submit.target(), "review");
/// assert!(submit.has_action());
/// ```
pub struct Event<H> {
    name: String,
    target: String,
    metadata: Metadata,
    action: Option<Action<H>>,
}

impl<H> Event<H> {
    /// Create an event transitioning to the named target state.
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            metadata: Metadata::new(),
            action: None,
        }
    }

    /// Attach metadata, replacing any previously attached map.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach the action to run when this event is triggered.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut H, &mut Control, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// The event's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the state this event transitions to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Metadata attached to this event.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Whether an action is attached.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub(crate) fn action(&self) -> Option<&Action<H>> {
        self.action.as_ref()
    }
}

impl<H> Clone for Event<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            target: self.target.clone(),
            metadata: self.metadata.clone(),
            action: self.action.as_ref().map(Arc::clone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_carries_name_and_target() {
        let event: Event<()> = Event::new("publish", "published");

        assert_eq!(event.name(), "publish");
        assert_eq!(event.target(), "published");
        assert!(!event.has_action());
        assert!(event.metadata().is_empty());
    }

    #[test]
    fn with_metadata_replaces_map() {
        let mut metadata = Metadata::new();
        metadata.insert("weight".to_string(), json!(3));

        let event: Event<()> = Event::new("advance", "next").with_metadata(metadata);

        assert_eq!(event.metadata().get("weight"), Some(&json!(3)));
    }

    #[test]
    fn action_runs_against_host() {
        let event: Event<Vec<String>> =
            Event::new("record", "done").with_action(|host: &mut Vec<String>, control, args| {
                host.push(format!("{} -> {}", control.from(), control.target()));
                args.first().cloned().unwrap_or(Value::Null)
            });

        let mut host = Vec::new();
        let mut control = Control::new("record", "start", "done");
        let action = event.action().cloned().unwrap();
        let value = action(&mut host, &mut control, &[json!(7)]);

        assert_eq!(value, json!(7));
        assert_eq!(host, vec!["start -> done".to_string()]);
    }

    #[test]
    fn clone_shares_the_action() {
        let event: Event<()> = Event::new("go", "there").with_action(|_, _, _| json!(true));
        let cloned = event.clone();

        assert!(cloned.has_action());
        assert_eq!(cloned.name(), event.name());
        assert_eq!(cloned.target(), event.target());
    }
}
