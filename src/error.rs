//! Error types for the storage and configuration boundaries.
//!
//! The simulation itself never fails: missing targets, empty catalogs and
//! out-of-bounds entities all degrade silently. Errors only surface where the
//! crate talks to the outside world (the gold store and tuning JSON), and
//! callers there usually log them and fall back to defaults.

use std::fmt;

/// Failure reading or writing the persistent gold value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backing store is reachable (no window, storage disabled, etc.)
    Unavailable,
    /// The store refused to read the key.
    Read(String),
    /// The store refused to write the key.
    Write(String),
    /// A value was present but is not a non-negative integer.
    Parse {
        /// The raw stored value.
        value: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "persistent storage is unavailable"),
            Self::Read(msg) => write!(f, "failed to read from storage: {msg}"),
            Self::Write(msg) => write!(f, "failed to write to storage: {msg}"),
            Self::Parse { value } => write!(f, "stored gold value {value:?} is not an integer"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Failure loading or validating a [`crate::Tuning`].
#[derive(Debug)]
pub enum TuningError {
    /// The JSON document could not be parsed.
    Json(serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid tuning JSON: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
