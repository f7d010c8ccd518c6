//! Core machine vocabulary: events, states, the trigger control handle,
//! and the transition journal.
//!
//! Everything here is a plain value type. States and events are declared
//! once through the builder in [`crate::spec`] and never mutated afterwards;
//! the journal is updated persistently (recording returns a new journal).
//! Hook and action closures receive the bound host as an explicit `&mut`
//! parameter, so the same machine definition can drive any host type.

mod control;
mod event;
mod journal;
mod state;

pub use control::Control;
pub use event::{Action, Event};
pub use journal::{Journal, TransitionRecord};
pub use state::{EntryHook, ExitHook, State};

pub(crate) use control::Halt;

use serde_json::Value;
use std::collections::HashMap;

/// String-keyed metadata attached to specifications, states, and events.
///
/// Values are arbitrary JSON, so definitions can carry whatever descriptive
/// data their callers need without the engine interpreting it.
pub type Metadata = HashMap<String, Value>;
