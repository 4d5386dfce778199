//! Entity validation: schema fields, undeclared keys, integrity rules.

use crate::{validate_field, IntegrityChecker, IntegrityOutcome, RuleContext, ValidationConfig};
use std::sync::Arc;
use till_model::{EntityKind, IssueReporter, Record, SchemaRegistry, TracingReporter, ValidationResult};
use till_types::{Clock, Millis, SystemClock};
use tracing::{debug, warn};

/// Validates records against their kind's schema and integrity rules.
///
/// Holds no per-call state; one instance can serve any number of concurrent
/// callers.
pub struct Validator {
    schemas: Arc<SchemaRegistry>,
    checker: Arc<IntegrityChecker>,
    config: ValidationConfig,
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn IssueReporter>,
}

impl Validator {
    /// Built-in schemas and rules, system clock, tracing reporter.
    pub fn new(config: ValidationConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates a record whose kind arrives as a wire string.
    ///
    /// An unknown kind yields a single error and no partial result.
    pub fn validate(&self, kind: &str, record: &Record) -> ValidationResult {
        match kind.parse::<EntityKind>() {
            Ok(k) if self.schemas.get(k).is_some() => self.validate_kind(k, record),
            _ => self.unknown_kind(kind),
        }
    }

    /// Validates a record of a known kind.
    ///
    /// Every declared field is checked and every message is collected.
    /// Keys the schema does not declare produce warnings, never errors.
    pub fn validate_kind(&self, kind: EntityKind, record: &Record) -> ValidationResult {
        let Some(schema) = self.schemas.get(kind) else {
            return self.unknown_kind(kind.as_str());
        };
        let now = self.clock.now_millis();
        let mut result = ValidationResult::ok();

        for decl in &schema.fields {
            result.merge(validate_field(
                &decl.name,
                record.get(&decl.name),
                decl,
                now,
                &self.config,
            ));
        }

        for key in record.keys() {
            if !schema.declares(key) {
                result.push_warning(format!("unexpected field: {key}"));
            }
        }

        for error in self.check_integrity_at(kind, record, now).errors {
            result.push_error(error);
        }

        if result.valid {
            debug!("{} record valid ({} warning(s))", kind, result.warnings.len());
        } else if self.config.report_failures {
            self.reporter.validation_failed(kind, &result);
        }
        result
    }

    /// Runs only the cross-field rules for `kind`.
    pub fn check_integrity(&self, kind: EntityKind, record: &Record) -> IntegrityOutcome {
        self.check_integrity_at(kind, record, self.clock.now_millis())
    }

    fn check_integrity_at(&self, kind: EntityKind, record: &Record, now: Millis) -> IntegrityOutcome {
        let ctx = RuleContext::new(now, &self.config, &self.schemas, &self.checker);
        self.checker.check(kind, record, &ctx)
    }

    fn unknown_kind(&self, kind: &str) -> ValidationResult {
        warn!("Validation requested for unknown entity kind {}", kind);
        self.reporter.unknown_kind(kind);
        ValidationResult::invalid(format!("Unknown entity kind: {kind}"))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

/// Assembles a [`Validator`] with injected collaborators.
pub struct ValidatorBuilder {
    schemas: Arc<SchemaRegistry>,
    checker: Arc<IntegrityChecker>,
    config: ValidationConfig,
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn IssueReporter>,
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self {
            schemas: SchemaRegistry::builtin(),
            checker: Arc::new(IntegrityChecker::with_default_rules()),
            config: ValidationConfig::default(),
            clock: Arc::new(SystemClock),
            reporter: Arc::new(TracingReporter),
        }
    }
}

impl ValidatorBuilder {
    pub fn schemas(mut self, schemas: Arc<SchemaRegistry>) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn checker(mut self, checker: IntegrityChecker) -> Self {
        self.checker = Arc::new(checker);
        self
    }

    pub fn config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn reporter(mut self, reporter: Arc<dyn IssueReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            schemas: self.schemas,
            checker: self.checker,
            config: self.config,
            clock: self.clock,
            reporter: self.reporter,
        }
    }
}
