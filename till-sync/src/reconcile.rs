use crate::{ConflictDetector, ConflictResolver, ResolveRequest, Resolution, SyncResult};
use std::sync::Arc;
use till_model::{EntityKind, IssueReporter, Record, SchemaRegistry};

/// Detect-then-resolve for one pair of snapshots.
///
/// Unlike [`ConflictDetector::detect`], an unknown kind is an error here.
pub struct Reconciler {
    detector: ConflictDetector,
    resolver: ConflictResolver,
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            detector: ConflictDetector::new(),
            resolver: ConflictResolver::new(),
        }
    }

    /// Built-in schemas and default priority, reporting to `reporter`.
    pub fn with_reporter(reporter: Arc<dyn IssueReporter>) -> Self {
        Self::from_parts(
            ConflictDetector::with_schemas(SchemaRegistry::builtin(), reporter.clone()),
            ConflictResolver::with_priority(crate::DEFAULT_PRIORITY.to_vec(), reporter),
        )
    }

    pub fn from_parts(detector: ConflictDetector, resolver: ConflictResolver) -> Self {
        Self { detector, resolver }
    }

    pub fn resolver(&self) -> &ConflictResolver {
        &self.resolver
    }

    pub fn reconcile(&self, local: &Record, remote: &Record, kind: &str) -> SyncResult<Resolution> {
        let kind: EntityKind = kind.parse()?;
        let detection = self.detector.detect_kind(local, remote, kind);
        Ok(self.resolver.resolve(&ResolveRequest {
            conflicts: &detection.conflicts,
            kind,
            local,
            remote,
        }))
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
