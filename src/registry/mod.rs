//! A shared catalog of named specifications with fallback resolution.
//!
//! Hosts that persist their state name usually share one specification
//! per kind of record. A [`Registry`] keys finalized
//! [`Specification`]s by name, lets a later definition re-open and
//! extend an earlier one, and resolves lookups through a
//! caller-supplied fallback chain so specialized kinds inherit the
//! definition of their base kind.

pub mod error;

pub use error::RegistryError;

use crate::spec::{DefinitionError, Specification, SpecificationBuilder};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A thread-safe map from key to shared [`Specification`].
///
/// Definition is additive: defining a key that already exists seeds the
/// builder with the existing states, so the new definition appends to
/// them rather than replacing them. A definition that fails validation
/// leaves the previous registration untouched.
///
/// Instances hold their own `Arc` to the specification they were
/// created with, so re-defining a key never changes machines already
/// running against the older definition.
///
/// # Example
///
/// ```rust
/// use flowstate::registry::Registry;
///
/// let registry: Registry<()> = Registry::new();
/// registry.define("article", |spec| {
///     spec.state("draft").event("submit", "review");
///     spec.state("review");
/// })?;
///
/// // Lookups walk the chain until a key matches.
/// let spec = registry.resolve(&["featured_article", "article"])?;
/// assert_eq!(spec.state_names(), vec!["draft", "review"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Registry<H> {
    specs: RwLock<HashMap<String, Arc<Specification<H>>>>,
}

impl<H> Registry<H> {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self {
            specs: RwLock::new(HashMap::new()),
        }
    }

    /// Define or extend the specification registered under `key`.
    ///
    /// Equivalent to [`define_with`](Registry::define_with) with no
    /// metadata.
    pub fn define<F>(&self, key: &str, build: F) -> Result<Arc<Specification<H>>, DefinitionError>
    where
        F: FnOnce(&mut SpecificationBuilder<H>),
    {
        self.define_with(key, std::iter::empty::<(String, Value)>(), build)
    }

    /// Define or extend the specification registered under `key`,
    /// merging `metadata` into the specification-wide metadata map.
    ///
    /// When `key` is already registered, the builder passed to `build`
    /// starts from the existing definition and appends to it. The new
    /// specification replaces the old one only after it validates;
    /// validation failures leave the previous registration in place.
    pub fn define_with<K, I, F>(
        &self,
        key: &str,
        metadata: I,
        build: F,
    ) -> Result<Arc<Specification<H>>, DefinitionError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
        F: FnOnce(&mut SpecificationBuilder<H>),
    {
        let existing = self.specs.read().get(key).cloned();

        let mut builder = match &existing {
            Some(spec) => SpecificationBuilder::from_specification(spec),
            None => SpecificationBuilder::new(),
        };
        for (meta_key, meta_value) in metadata {
            builder.metadata(meta_key, meta_value);
        }
        build(&mut builder);
        let spec = Arc::new(builder.finalize()?);

        self.specs.write().insert(key.to_string(), spec.clone());
        tracing::debug!(key = %key, states = spec.states().len(), "registered specification");
        Ok(spec)
    }

    /// The specification registered under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Arc<Specification<H>>> {
        self.specs.read().get(key).cloned()
    }

    /// Resolve a specification by walking `chain` in order and returning
    /// the first registered key.
    ///
    /// Callers pass the most specialized key first, e.g.
    /// `&["featured_article", "article"]`.
    pub fn resolve(&self, chain: &[&str]) -> Result<Arc<Specification<H>>, RegistryError> {
        let specs = self.specs.read();
        for key in chain {
            if let Some(spec) = specs.get(*key) {
                return Ok(spec.clone());
            }
        }
        Err(RegistryError::SpecificationNotFound {
            searched: chain.iter().map(|key| key.to_string()).collect(),
        })
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.specs.read().contains_key(key)
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.specs.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// The number of registered specifications.
    pub fn len(&self) -> usize {
        self.specs.read().len()
    }

    /// Whether the registry has no registrations.
    pub fn is_empty(&self) -> bool {
        self.specs.read().is_empty()
    }

    /// Drop every registration.
    ///
    /// Machines already running keep the specifications they hold.
    pub fn reset(&self) {
        self.specs.write().clear();
        tracing::debug!("registry cleared");
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}
