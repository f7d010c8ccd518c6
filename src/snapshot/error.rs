//! Errors from encoding and decoding snapshots.

use thiserror::Error;

/// Errors from serializing, deserializing, or validating a
/// [`Snapshot`](super::Snapshot).
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot could not be serialized.
    #[error("Snapshot serialization failed: {0}")]
    SerializationFailed(String),

    /// The payload could not be deserialized as a snapshot.
    #[error("Snapshot deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The payload carries a snapshot format version this build does not
    /// read.
    #[error("Unsupported snapshot version {found}, this build supports version {supported}")]
    UnsupportedVersion {
        /// The version carried by the payload.
        found: u32,
        /// The version this build writes and reads.
        supported: u32,
    },
}
