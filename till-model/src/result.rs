//! Plain result data handed back to callers. Everything here serializes so a
//! UI dialog or a log line can show it verbatim.

use crate::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use till_types::Millis;

/// Outcome of validating one field or one whole record.
///
/// `valid` is true iff `errors` is empty; warnings never affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no messages.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A failing result carrying a single error.
    #[must_use]
    pub fn invalid(error: impl Into<String>) -> Self {
        let mut result = Self::ok();
        result.push_error(error);
        result
    }

    pub fn push_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.valid = false;
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Appends every message of `other`.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// A field on which the local and remote snapshots disagree.
///
/// Absent values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub field: String,
    pub local_value: Option<Value>,
    pub remote_value: Option<Value>,
    pub local_timestamp: Millis,
    pub remote_timestamp: Millis,
}

impl Conflict {
    pub fn timestamps_tied(&self) -> bool {
        self.local_timestamp == self.remote_timestamp
    }
}

/// Output of conflict detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub has_conflicts: bool,
    pub conflicts: Vec<Conflict>,
}

impl DetectionResult {
    /// No disagreements.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        Self {
            has_conflicts: !conflicts.is_empty(),
            conflicts,
        }
    }
}

/// Output of a repair pass. `data` is a new record; the input is untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairOutcome {
    pub repaired: bool,
    pub repairs: Vec<String>,
    pub data: Record,
}
