//! Core entity model for the till data-integrity engine.
//!
//! Defines the types every other till crate depends on:
//! - [`EntityKind`]: the closed set of entity categories (ingredient, menu, ...)
//! - [`Record`]: the untyped key/value snapshot exchanged with storage and UI
//! - [`EntityRecord`]: typed per-kind views projected from a [`Record`]
//! - [`SchemaRegistry`]: per-kind ordered field declarations
//! - [`ValidationResult`], [`Conflict`], [`RepairOutcome`]: plain result data
//! - [`IssueReporter`]: injected sink for failures the host wants to observe
//!
//! Everything here is plain data. Behavior lives in `till-integrity`
//! (validation, repair) and `till-sync` (conflict detection and resolution).

mod error;
mod kind;
mod record;
mod report;
mod result;
mod schema;
mod typed;

pub use error::{ModelError, ModelResult};
pub use kind::EntityKind;
pub use record::{deep_equal, is_missing_value, parse_number, Record, CREATED_AT, LAST_UPDATED};
pub use report::{IssueReporter, NullReporter, TracingReporter};
pub use result::{Conflict, DetectionResult, RepairOutcome, ValidationResult};
pub use schema::{FieldDecl, FieldType, Schema, SchemaRegistry};
pub use typed::{
    EntityRecord, Ingredient, LineItem, Menu, MenuIngredient, Transaction, TransactionType,
};
