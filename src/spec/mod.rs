//! Specification model: the builder DSL and the finalized definitions it
//! produces.
//!
//! A definition is declared sequentially against a
//! [`SpecificationBuilder`] and committed atomically by
//! [`SpecificationBuilder::finalize`], which enforces the structural
//! invariants (unique state names, unique event names per state, every
//! event target declared) before any [`Specification`] exists.

mod builder;
mod error;
mod specification;

pub use builder::SpecificationBuilder;
pub use error::DefinitionError;
pub use specification::{Specification, TransitionHook};
