//! Binding machines to hosts that persist their state name.
//!
//! A host record that stores its current state as a string implements
//! [`PersistedState`]. [`attach`] then builds the right kind of
//! [`Instance`] for it: a fresh machine for hosts with no stored state,
//! a reconstituted one otherwise, either way wired to write every state
//! change back to the host. [`dispatch`] routes a dynamic name to the
//! machine when it handles it and to a caller-supplied fallback when it
//! does not.

use crate::engine::{EngineError, Instance, Outcome};
use crate::spec::Specification;
use serde_json::Value;
use std::sync::Arc;

/// Storage contract for hosts that persist their current state by name.
pub trait PersistedState {
    /// The persisted state name, or `None` when the host has never held
    /// one.
    fn stored_state(&self) -> Option<String>;

    /// Write a state name back to the host's storage field.
    fn store_state(&mut self, state: &str);
}

/// Bind a machine to a persisting host.
///
/// Hosts with no stored state get a fresh machine in the
/// specification's initial state, and that name is written back
/// immediately. Hosts with a stored state are reconstituted there with
/// no hooks fired. In both cases the returned machine carries a
/// state-change callback that stores the new state name after every
/// completed transition. Fails with [`EngineError::UnknownState`] when
/// the stored name is not declared in the specification.
///
/// # Example
///
/// ```rust
/// use flowstate::binding::{attach, PersistedState};
/// use flowstate::spec::SpecificationBuilder;
/// use std::sync::Arc;
///
/// struct Order {
///     workflow_state: Option<String>,
/// }
///
/// impl PersistedState for Order {
///     fn stored_state(&self) -> Option<String> {
///         self.workflow_state.clone()
///     }
///
///     fn store_state(&mut self, state: &str) {
///         self.workflow_state = Some(state.to_string());
///     }
/// }
///
/// let mut builder = SpecificationBuilder::new();
/// builder.state("accepted").event("ship", "shipped");
/// builder.state("shipped");
/// let spec = Arc::new(builder.finalize()?);
///
/// let mut order = Order {
///     workflow_state: None,
/// };
/// let mut machine = attach(spec, &mut order)?;
/// assert_eq!(order.workflow_state.as_deref(), Some("accepted"));
///
/// machine.trigger(&mut order, "ship", &[])?;
/// assert_eq!(order.workflow_state.as_deref(), Some("shipped"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn attach<H>(spec: Arc<Specification<H>>, host: &mut H) -> Result<Instance<H>, EngineError>
where
    H: PersistedState,
{
    let mut machine = match host.stored_state() {
        Some(state) => Instance::reconstitute(spec, &state)?,
        None => {
            let machine = Instance::new(spec, host);
            host.store_state(machine.state());
            machine
        }
    };
    machine.on_state_change(|host: &mut H, state: &str| host.store_state(state));
    Ok(machine)
}

/// Route a dynamic name to the machine or to a fallback.
///
/// Names the machine [`handles`](Instance::handles) are triggered on
/// it - events on the current state and `"name?"` predicates for
/// declared states. Everything else goes to `fallback`, which decides
/// what an unhandled name means for the host.
pub fn dispatch<H, F>(
    machine: &mut Instance<H>,
    host: &mut H,
    name: &str,
    args: &[Value],
    fallback: F,
) -> Result<Outcome, EngineError>
where
    F: FnOnce(&mut H, &str, &[Value]) -> Result<Outcome, EngineError>,
{
    if machine.handles(name) {
        machine.trigger(host, name, args)
    } else {
        fallback(host, name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SpecificationBuilder;
    use serde_json::json;

    #[derive(Default)]
    struct Ticket {
        state: Option<String>,
        saves: usize,
    }

    impl PersistedState for Ticket {
        fn stored_state(&self) -> Option<String> {
            self.state.clone()
        }

        fn store_state(&mut self, state: &str) {
            self.state = Some(state.to_string());
            self.saves += 1;
        }
    }

    fn ticket_spec() -> Arc<Specification<Ticket>> {
        let mut builder = SpecificationBuilder::new();
        builder.state("open").event("start", "in_progress");
        builder.state("in_progress").event("close", "closed");
        builder.state("closed");
        Arc::new(builder.finalize().unwrap())
    }

    #[test]
    fn attach_stores_the_initial_state_for_fresh_hosts() {
        let mut ticket = Ticket::default();
        let machine = attach(ticket_spec(), &mut ticket).unwrap();

        assert_eq!(machine.state(), "open");
        assert_eq!(ticket.state.as_deref(), Some("open"));
        assert_eq!(ticket.saves, 1);
    }

    #[test]
    fn attach_reconstitutes_stored_state_without_writing() {
        let mut ticket = Ticket {
            state: Some("in_progress".to_string()),
            saves: 0,
        };
        let machine = attach(ticket_spec(), &mut ticket).unwrap();

        assert_eq!(machine.state(), "in_progress");
        assert_eq!(ticket.saves, 0);
        assert!(machine.journal().is_empty());
    }

    #[test]
    fn attach_rejects_undeclared_stored_states() {
        let mut ticket = Ticket {
            state: Some("bogus".to_string()),
            saves: 0,
        };

        assert!(matches!(
            attach(ticket_spec(), &mut ticket),
            Err(EngineError::UnknownState { name }) if name == "bogus"
        ));
    }

    #[test]
    fn transitions_write_the_new_state_back() {
        let mut ticket = Ticket::default();
        let mut machine = attach(ticket_spec(), &mut ticket).unwrap();

        machine.trigger(&mut ticket, "start", &[]).unwrap();
        assert_eq!(ticket.state.as_deref(), Some("in_progress"));
        assert_eq!(ticket.saves, 2);

        machine.trigger(&mut ticket, "close", &[]).unwrap();
        assert_eq!(ticket.state.as_deref(), Some("closed"));
        assert_eq!(ticket.saves, 3);
    }

    #[test]
    fn halted_transitions_do_not_write_back() {
        let mut builder = SpecificationBuilder::new();
        builder
            .state("open")
            .event_with("start", "in_progress", |_: &mut Ticket, control, _| {
                control.halt("needs triage");
                Value::Null
            });
        builder.state("in_progress");
        let spec = Arc::new(builder.finalize().unwrap());

        let mut ticket = Ticket::default();
        let mut machine = attach(spec, &mut ticket).unwrap();
        assert_eq!(ticket.saves, 1);

        let outcome = machine.trigger(&mut ticket, "start", &[]).unwrap();
        assert_eq!(outcome, Outcome::Halted);
        assert_eq!(ticket.state.as_deref(), Some("open"));
        assert_eq!(ticket.saves, 1);
    }

    #[test]
    fn dispatch_routes_events_and_predicates_to_the_machine() {
        let mut ticket = Ticket::default();
        let mut machine = attach(ticket_spec(), &mut ticket).unwrap();

        let outcome = dispatch(&mut machine, &mut ticket, "start", &[], |_, _, _| {
            panic!("the machine should handle this name")
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Completed(Value::Null));
        assert_eq!(machine.state(), "in_progress");

        let outcome = dispatch(&mut machine, &mut ticket, "closed?", &[], |_, _, _| {
            panic!("the machine should handle this name")
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Query(false));
    }

    #[test]
    fn dispatch_falls_back_for_unhandled_names() {
        let mut ticket = Ticket::default();
        let mut machine = attach(ticket_spec(), &mut ticket).unwrap();

        let outcome = dispatch(
            &mut machine,
            &mut ticket,
            "archive",
            &[json!(1)],
            |host, name, args| {
                host.saves += 10;
                Ok(Outcome::Completed(json!(format!(
                    "{name} with {} args",
                    args.len()
                ))))
            },
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Completed(json!("archive with 1 args")));
        assert_eq!(ticket.saves, 11);
        assert_eq!(machine.state(), "open");
    }
}
