//! Versioned snapshot envelope for persisted collections.
//!
//! # Responsibility
//! - Encode/decode collection payloads with an explicit schema version tag.
//! - Upgrade the legacy unversioned shape (a bare JSON array) in memory.
//!
//! # Invariants
//! - Every payload written by this build carries `version = SNAPSHOT_VERSION`.
//! - Payloads tagged with a newer version are refused, never guessed at.
//! - A legacy bare-array payload decodes as version 0 and is rewritten in
//!   the current shape on the next save.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Schema version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    records: Vec<T>,
}

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    records: &'a [T],
}

/// Decode failures for persisted snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Payload was written by a newer build.
    UnsupportedVersion {
        payload_version: u32,
        latest_supported: u32,
    },
    /// Payload is not a snapshot in any known shape.
    Malformed(String),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion {
                payload_version,
                latest_supported,
            } => write!(
                f,
                "snapshot version {payload_version} is newer than supported {latest_supported}"
            ),
            Self::Malformed(message) => write!(f, "malformed snapshot payload: {message}"),
        }
    }
}

impl Error for SnapshotError {}

/// Serializes records into the current envelope shape.
pub fn encode<T: Serialize>(records: &[T]) -> Result<String, SnapshotError> {
    let envelope = EnvelopeRef {
        version: SNAPSHOT_VERSION,
        records,
    };
    serde_json::to_string(&envelope).map_err(|err| SnapshotError::Malformed(err.to_string()))
}

/// Deserializes a snapshot payload, accepting the legacy bare-array shape.
pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<Vec<T>, SnapshotError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|err| SnapshotError::Malformed(err.to_string()))?;

    match value {
        // Version 0: the source product persisted the collection directly.
        Value::Array(_) => serde_json::from_value::<Vec<T>>(value)
            .map_err(|err| SnapshotError::Malformed(err.to_string())),
        Value::Object(_) => {
            let payload_version = value
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    SnapshotError::Malformed("missing or non-numeric `version` field".to_string())
                })?;
            if payload_version > u64::from(SNAPSHOT_VERSION) {
                return Err(SnapshotError::UnsupportedVersion {
                    payload_version: payload_version.min(u64::from(u32::MAX)) as u32,
                    latest_supported: SNAPSHOT_VERSION,
                });
            }
            serde_json::from_value::<Envelope<T>>(value)
                .map(|envelope| envelope.records)
                .map_err(|err| SnapshotError::Malformed(err.to_string()))
        }
        other => Err(SnapshotError::Malformed(format!(
            "expected array or object, got {other}"
        ))),
    }
}
