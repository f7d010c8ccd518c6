//! Definition errors raised when a specification fails to finalize.

use thiserror::Error;

/// Errors raised while building a specification.
///
/// All of these surface from
/// [`SpecificationBuilder::finalize`](crate::spec::SpecificationBuilder::finalize):
/// the builder buffers declarations and reports the first problem when the
/// definition is committed, so a failed definition never leaves a
/// half-built machine behind.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Event '{event}' was declared before any state. Call .state(name) first")]
    EventBeforeState { event: String },

    #[error("{hook} was declared before any state. Call .state(name) first")]
    HookBeforeState { hook: String },

    #[error("A specification needs at least one state. Call .state(name) before .finalize()")]
    MissingStates,

    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("Event '{event}' is declared more than once on state '{state}'")]
    DuplicateEvent { state: String, event: String },

    #[error("Event '{event}' on state '{state}' targets undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },
}
