//! Flowstate: a dynamic, string-keyed state machine engine
//!
//! Flowstate drives workflows whose states and events are data rather
//! than types: specifications are assembled at runtime from string
//! names, validated once, shared behind `Arc`, and run by lightweight
//! instances bound to any host type. Hosts that persist their current
//! state as a string plug in through a two-method trait and get the
//! state written back after every completed transition.
//!
//! # Core Concepts
//!
//! - **Specification**: an immutable, validated graph of named states
//!   and events, assembled with [`SpecificationBuilder`]
//! - **Instance**: one running machine; holds the current state, the
//!   halt status of the most recent trigger, and a [`Journal`] of
//!   completed transitions
//! - **Hooks**: entry, exit, and transition closures plus per-event
//!   actions, which can stop a transition through a [`Control`] handle
//! - **Registry**: a shared catalog of named specifications with
//!   fallback resolution across keys
//! - **Binding**: the [`PersistedState`] contract wiring machines to
//!   hosts that store their state name
//!
//! # Example
//!
//! ```rust
//! use flowstate::{Instance, SpecificationBuilder};
//! use std::sync::Arc;
//!
//! let mut builder = SpecificationBuilder::new();
//! builder.state("locked").event("coin", "unlocked");
//! builder.state("unlocked").event("push", "locked");
//! let spec = Arc::new(builder.finalize()?);
//!
//! let mut turnstile = Instance::unbound(spec);
//! turnstile.trigger_unbound("coin", &[])?;
//! assert!(turnstile.is("unlocked"));
//!
//! // Undeclared "name?" events answer state predicates.
//! let query = turnstile.trigger_unbound("locked?", &[])?;
//! assert_eq!(query.as_query(), Some(false));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binding;
pub mod core;
pub mod engine;
pub mod registry;
pub mod snapshot;
pub mod spec;

// Re-export commonly used types
pub use binding::{attach, dispatch, PersistedState};
pub use engine::{EngineError, Instance, Outcome, StateChangeHook};
pub use registry::{Registry, RegistryError};
pub use self::core::{Control, Event, Journal, Metadata, State, TransitionRecord};
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};
pub use spec::{DefinitionError, Specification, SpecificationBuilder, TransitionHook};
