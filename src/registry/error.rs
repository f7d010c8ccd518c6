//! Errors from looking up registered specifications.

use thiserror::Error;

/// Errors from resolving a specification out of a
/// [`Registry`](super::Registry).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// None of the searched keys named a registered specification.
    #[error("No specification registered for any of {searched:?}")]
    SpecificationNotFound {
        /// The keys tried, in the order they were tried.
        searched: Vec<String>,
    },
}
