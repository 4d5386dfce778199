//! Injected sink for failures the surrounding application wants to observe.
//!
//! The engine never reaches for a global error handler. Hosts pass an
//! `Arc<dyn IssueReporter>` to validators and resolvers instead; tests pass
//! [`NullReporter`] or a recording implementation.

use crate::{Conflict, EntityKind, ValidationResult};
use tracing::{info, warn};

/// Receives notable engine outcomes. Every method defaults to a no-op, so an
/// implementation only overrides what it cares about.
pub trait IssueReporter: Send + Sync {
    /// A record failed validation.
    fn validation_failed(&self, kind: EntityKind, result: &ValidationResult) {
        let _ = (kind, result);
    }

    /// A caller named an entity kind with no schema.
    fn unknown_kind(&self, kind: &str) {
        let _ = kind;
    }

    /// A merge left fields that need a human decision.
    fn manual_resolution_required(&self, kind: EntityKind, conflicts: &[Conflict]) {
        let _ = (kind, conflicts);
    }

    /// A repair pass rewrote derived fields.
    fn repaired(&self, kind: EntityKind, repairs: &[String]) {
        let _ = (kind, repairs);
    }
}

/// Drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl IssueReporter for NullReporter {}

/// Forwards reports to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl IssueReporter for TracingReporter {
    fn validation_failed(&self, kind: EntityKind, result: &ValidationResult) {
        warn!(
            "{} record rejected with {} error(s): {}",
            kind,
            result.errors.len(),
            result.errors.join("; ")
        );
    }

    fn unknown_kind(&self, kind: &str) {
        warn!("Unknown entity kind: {}", kind);
    }

    fn manual_resolution_required(&self, kind: EntityKind, conflicts: &[Conflict]) {
        let fields: Vec<&str> = conflicts.iter().map(|c| c.field.as_str()).collect();
        warn!("{} merge needs manual resolution for: {}", kind, fields.join(", "));
    }

    fn repaired(&self, kind: EntityKind, repairs: &[String]) {
        info!("Repaired {} record: {}", kind, repairs.join("; "));
    }
}
