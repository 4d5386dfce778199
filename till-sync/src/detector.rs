//! Conflict detection between a local and a remote snapshot.

use std::sync::Arc;
use till_model::{
    deep_equal, Conflict, DetectionResult, EntityKind, IssueReporter, Record, SchemaRegistry,
    TracingReporter, LAST_UPDATED,
};
use tracing::{debug, warn};

/// Lists the schema fields on which two snapshots of one entity disagree.
pub struct ConflictDetector {
    schemas: Arc<SchemaRegistry>,
    reporter: Arc<dyn IssueReporter>,
}

impl ConflictDetector {
    /// Built-in schemas, tracing reporter.
    pub fn new() -> Self {
        Self::with_schemas(SchemaRegistry::builtin(), Arc::new(TracingReporter))
    }

    pub fn with_schemas(schemas: Arc<SchemaRegistry>, reporter: Arc<dyn IssueReporter>) -> Self {
        Self { schemas, reporter }
    }

    /// Detects conflicts for a kind given as a wire string.
    ///
    /// An unknown kind reports no conflicts. Callers must treat an unknown
    /// kind as an error of their own (see [`Reconciler`](crate::Reconciler)).
    pub fn detect(&self, local: &Record, remote: &Record, kind: &str) -> DetectionResult {
        match kind.parse::<EntityKind>() {
            Ok(k) => self.detect_kind(local, remote, k),
            Err(_) => {
                warn!("Conflict detection requested for unknown entity kind {}", kind);
                self.reporter.unknown_kind(kind);
                DetectionResult::none()
            }
        }
    }

    /// Detects conflicts for a known kind.
    ///
    /// Equal `lastUpdated` values are taken to mean identical provenance and
    /// short-circuit to "no conflicts" without comparing fields. Otherwise
    /// every declared field is compared in schema order.
    pub fn detect_kind(&self, local: &Record, remote: &Record, kind: EntityKind) -> DetectionResult {
        let Some(schema) = self.schemas.get(kind) else {
            warn!("No schema registered for {}, reporting no conflicts", kind);
            self.reporter.unknown_kind(kind.as_str());
            return DetectionResult::none();
        };

        if deep_equal(local.get(LAST_UPDATED), remote.get(LAST_UPDATED)) {
            debug!("{} snapshots share lastUpdated, skipping field comparison", kind);
            return DetectionResult::none();
        }

        let local_timestamp = local.last_updated().unwrap_or(0);
        let remote_timestamp = remote.last_updated().unwrap_or(0);

        let conflicts: Vec<Conflict> = schema
            .field_names()
            .filter(|field| !deep_equal(local.get(field), remote.get(field)))
            .map(|field| Conflict {
                field: field.to_string(),
                local_value: local.get(field).cloned(),
                remote_value: remote.get(field).cloned(),
                local_timestamp,
                remote_timestamp,
            })
            .collect();

        debug!("{} snapshots differ on {} field(s)", kind, conflicts.len());
        DetectionResult::from_conflicts(conflicts)
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
