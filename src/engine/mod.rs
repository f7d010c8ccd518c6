//! Running machines and the outcomes of triggering events on them.
//!
//! An [`Instance`] pairs a shared [`Specification`](crate::spec::Specification)
//! with a current state and a journal. Triggering an event yields an
//! [`Outcome`] on success and an [`EngineError`] when the event is
//! unrecognized or a hook halts the transition hard.

mod error;
mod instance;
mod outcome;

pub use error::EngineError;
pub use instance::{Instance, StateChangeHook};
pub use outcome::Outcome;
