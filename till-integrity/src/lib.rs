//! Validation and repair for till entity records.
//!
//! Records pass through three layers before they may be persisted:
//!
//! 1. **Field validation** ([`validate_field`]) checks one value against one
//!    schema declaration: type, required-ness, bounds.
//! 2. **Entity validation** ([`Validator`]) runs every declared field of the
//!    kind's schema, warns about undeclared keys, and accumulates every
//!    message instead of stopping at the first.
//! 3. **Integrity rules** ([`IntegrityChecker`]) enforce cross-field
//!    invariants such as "the total equals the sum of the lines".
//!
//! When validation flags a derivable field as inconsistent, a [`Repairer`]
//! can recompute it and explain what it changed.
//!
//! Everything here is synchronous and side-effect free apart from the
//! injected [`IssueReporter`](till_model::IssueReporter). Inputs are never
//! mutated.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use till_integrity::{ValidationConfig, Validator};
//! use till_model::Record;
//!
//! let validator = Validator::new(ValidationConfig::default());
//! let record = Record::from_value(json!({"quantity": 2, "unitPrice": 50, "totalPrice": 100}))
//!     .unwrap();
//! assert!(validator.validate("purchaseItem", &record).valid);
//! ```

mod config;
mod field;
mod repair;
mod rules;
mod validator;

pub use config::ValidationConfig;
pub use field::validate_field;
pub use repair::{RepairFn, RepairRule, Repairer};
pub use rules::{
    IntegrityChecker, IntegrityOutcome, IntegrityRule, RuleContext, RuleFn, CURRENCY_TOLERANCE,
    FUTURE_SKEW_TOLERANCE_MS,
};
pub use validator::{Validator, ValidatorBuilder};
