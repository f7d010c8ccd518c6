//! Serializable snapshots of running machines.
//!
//! A [`Snapshot`] captures everything an [`Instance`] owns at rest: the
//! current state name, the halt status of the most recent trigger, and
//! the journal, tagged with a format version, a unique id, and a capture
//! timestamp. Snapshots encode to JSON for logs and fixtures and to a
//! compact binary form for storage. [`Instance::restore`] rebuilds a
//! machine from one against the matching specification.
//!
//! Hooks and actions live in the specification, not the snapshot, so a
//! snapshot is only as portable as the specification it was captured
//! against.

pub mod error;

pub use error::SnapshotError;

use crate::core::Journal;
use crate::engine::Instance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The snapshot format version this build writes and reads.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A point-in-time capture of one running machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version, checked on every decode.
    pub version: u32,
    /// Unique id for this capture.
    pub id: String,
    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,
    /// The current state name.
    pub state: String,
    /// Whether the most recent trigger halted.
    pub halted: bool,
    /// The halt reason, when the most recent trigger halted.
    pub halted_because: Option<String>,
    /// The journal of completed transitions.
    pub journal: Journal,
}

impl Snapshot {
    /// Capture the serializable parts of a running machine.
    pub fn capture<H>(instance: &Instance<H>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            state: instance.state().to_string(),
            halted: instance.halted(),
            halted_because: instance.halted_because().map(str::to_string),
            journal: instance.journal().clone(),
        }
    }

    /// Encode the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode a snapshot from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()?;
        Ok(snapshot)
    }

    /// Encode the snapshot in a compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode a snapshot from its binary form, rejecting unsupported
    /// versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()?;
        Ok(snapshot)
    }

    fn validate_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Specification, SpecificationBuilder};
    use serde_json::Value;
    use std::sync::Arc;

    fn review_spec() -> Arc<Specification<()>> {
        let mut builder = SpecificationBuilder::new();
        builder.state("draft").event("submit", "review");
        builder.state("review").event("approve", "published");
        builder.state("published");
        Arc::new(builder.finalize().unwrap())
    }

    fn gated_spec() -> Arc<Specification<()>> {
        let mut builder = SpecificationBuilder::new();
        builder
            .state("draft")
            .event_with("submit", "review", |_: &mut (), control, _| {
                control.halt("stuck");
                Value::Null
            });
        builder.state("review");
        Arc::new(builder.finalize().unwrap())
    }

    #[test]
    fn capture_reflects_the_machine() {
        let mut machine = Instance::unbound(review_spec());
        machine.trigger_unbound("submit", &[]).unwrap();

        let snapshot = machine.snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.state, "review");
        assert!(!snapshot.halted);
        assert_eq!(snapshot.halted_because, None);
        assert_eq!(snapshot.journal.path(), vec!["draft", "review"]);
    }

    #[test]
    fn json_round_trip_restores_the_machine() {
        let mut machine = Instance::unbound(review_spec());
        machine.trigger_unbound("submit", &[]).unwrap();

        let json = machine.snapshot().to_json().unwrap();
        let snapshot = Snapshot::from_json(&json).unwrap();
        let restored = Instance::restore(review_spec(), &snapshot).unwrap();

        assert_eq!(restored.state(), "review");
        assert_eq!(restored.journal().path(), vec!["draft", "review"]);
        assert!(restored.can_trigger("approve"));
    }

    #[test]
    fn binary_round_trip_preserves_halt_status() {
        let mut machine = Instance::unbound(gated_spec());
        machine.trigger_unbound("submit", &[]).unwrap();
        assert!(machine.halted());

        let bytes = machine.snapshot().to_bytes().unwrap();
        let snapshot = Snapshot::from_bytes(&bytes).unwrap();
        let restored = Instance::restore(gated_spec(), &snapshot).unwrap();

        assert_eq!(restored.state(), "draft");
        assert!(restored.halted());
        assert_eq!(restored.halted_because(), Some("stuck"));
    }

    #[test]
    fn distinct_captures_get_distinct_ids() {
        let machine = Instance::unbound(review_spec());

        let first = machine.snapshot();
        let second = machine.snapshot();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn decoding_rejects_other_versions() {
        let mut snapshot = Instance::unbound(review_spec()).snapshot();
        snapshot.version = 99;
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(matches!(
            Snapshot::from_json(&json),
            Err(SnapshotError::UnsupportedVersion {
                found: 99,
                supported: SNAPSHOT_VERSION,
            })
        ));
    }
}
