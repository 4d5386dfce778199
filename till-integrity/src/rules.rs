//! Cross-field integrity rules.
//!
//! Each entity kind maps to a list of [`IntegrityRule`]s. A new kind or a new
//! invariant is added with [`IntegrityChecker::register`]; there is no
//! central match over kinds to edit.

use crate::{validate_field, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use till_model::{EntityKind, EntityRecord, Record, SchemaRegistry};
use till_types::{Millis, SECOND_MS};
use tracing::debug;

/// Absolute slack allowed when comparing currency amounts (two-decimal
/// precision). Not configurable.
pub const CURRENCY_TOLERANCE: f64 = 0.01;

/// How far in the future a transaction's timestamp may lie.
pub const FUTURE_SKEW_TOLERANCE_MS: Millis = 60 * SECOND_MS;

/// Signature of a rule: inspect a typed record, return error messages.
pub type RuleFn = fn(&EntityRecord, &RuleContext<'_>) -> Vec<String>;

/// A named cross-field invariant.
#[derive(Debug, Clone, Copy)]
pub struct IntegrityRule {
    pub name: &'static str,
    pub check: RuleFn,
}

impl IntegrityRule {
    pub const fn new(name: &'static str, check: RuleFn) -> Self {
        Self { name, check }
    }
}

/// Result of running every rule registered for a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// What a rule may consult besides the record itself.
pub struct RuleContext<'a> {
    pub now: Millis,
    pub config: &'a ValidationConfig,
    schemas: &'a SchemaRegistry,
    checker: &'a IntegrityChecker,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        now: Millis,
        config: &'a ValidationConfig,
        schemas: &'a SchemaRegistry,
        checker: &'a IntegrityChecker,
    ) -> Self {
        Self {
            now,
            config,
            schemas,
            checker,
        }
    }

    /// Validates a nested record (a transaction line) against `kind`'s schema
    /// and integrity rules. Only errors are returned; warnings about nested
    /// records are not surfaced.
    pub fn validate_nested(&self, kind: EntityKind, record: &Record) -> Vec<String> {
        let Some(schema) = self.schemas.get(kind) else {
            return vec![format!("no schema registered for {kind}")];
        };
        let mut errors: Vec<String> = schema
            .fields
            .iter()
            .flat_map(|decl| {
                validate_field(&decl.name, record.get(&decl.name), decl, self.now, self.config)
                    .errors
            })
            .collect();
        errors.extend(self.checker.check(kind, record, self).errors);
        errors
    }
}

/// Registry of integrity rules keyed by entity kind.
#[derive(Debug, Clone, Default)]
pub struct IntegrityChecker {
    rules: HashMap<EntityKind, Vec<IntegrityRule>>,
}

impl IntegrityChecker {
    /// A checker with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// A checker preloaded with the point-of-sale invariants.
    pub fn with_default_rules() -> Self {
        let mut checker = Self::new();
        checker.register(
            EntityKind::Ingredient,
            IntegrityRule::new("conversion-ratio-positive", conversion_ratio_positive),
        );
        checker.register(
            EntityKind::Menu,
            IntegrityRule::new("recipe-lines-complete", recipe_lines_complete),
        );
        checker.register(
            EntityKind::Menu,
            IntegrityRule::new("price-covers-cost", price_covers_cost),
        );
        checker.register(
            EntityKind::Transaction,
            IntegrityRule::new("line-items-valid", line_items_valid),
        );
        checker.register(
            EntityKind::Transaction,
            IntegrityRule::new("total-matches-lines", total_matches_lines),
        );
        checker.register(
            EntityKind::Transaction,
            IntegrityRule::new("timestamp-not-future", timestamp_not_future),
        );
        for kind in [EntityKind::PurchaseItem, EntityKind::SaleItem] {
            checker.register(
                kind,
                IntegrityRule::new("line-total-matches", line_total_matches),
            );
        }
        checker
    }

    /// Appends a rule for `kind`. Rules run in registration order.
    pub fn register(&mut self, kind: EntityKind, rule: IntegrityRule) {
        self.rules.entry(kind).or_default().push(rule);
    }

    pub fn rules(&self, kind: EntityKind) -> &[IntegrityRule] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Runs every rule registered for `kind` against `record`.
    pub fn check(&self, kind: EntityKind, record: &Record, ctx: &RuleContext<'_>) -> IntegrityOutcome {
        let rules = self.rules(kind);
        if rules.is_empty() {
            return IntegrityOutcome {
                valid: true,
                errors: Vec::new(),
            };
        }

        let typed = EntityRecord::project(kind, record);
        let mut errors = Vec::new();
        for rule in rules {
            let found = (rule.check)(&typed, ctx);
            if !found.is_empty() {
                debug!("Rule {} flagged {} record: {:?}", rule.name, kind, found);
            }
            errors.extend(found);
        }
        IntegrityOutcome {
            valid: errors.is_empty(),
            errors,
        }
    }
}

fn amounts_differ(a: f64, b: f64) -> bool {
    (a - b).abs() > CURRENCY_TOLERANCE
}

// ── Default rules ────────────────────────────────────────────────

fn conversion_ratio_positive(record: &EntityRecord, _: &RuleContext<'_>) -> Vec<String> {
    let EntityRecord::Ingredient(ingredient) = record else {
        return Vec::new();
    };
    match ingredient.conversion_ratio {
        Some(ratio) if ratio <= 0.0 => {
            vec![format!("conversionRatio must be greater than 0, got {ratio}")]
        }
        _ => Vec::new(),
    }
}

fn recipe_lines_complete(record: &EntityRecord, _: &RuleContext<'_>) -> Vec<String> {
    let EntityRecord::Menu(menu) = record else {
        return Vec::new();
    };
    let mut errors = Vec::new();
    for (i, line) in menu.ingredients.iter().enumerate() {
        if line.ingredient_id.as_deref().is_none_or(str::is_empty) {
            errors.push(format!("ingredients[{i}]: ingredientId is required"));
        }
        if !line.quantity.is_some_and(|q| q > 0.0) {
            errors.push(format!("ingredients[{i}]: quantity must be greater than 0"));
        }
    }
    errors
}

fn price_covers_cost(record: &EntityRecord, _: &RuleContext<'_>) -> Vec<String> {
    let EntityRecord::Menu(menu) = record else {
        return Vec::new();
    };
    match (menu.price, menu.cost) {
        (Some(price), Some(cost)) if price < cost => vec![format!(
            "price ({price:.2}) must not be lower than cost ({cost:.2})"
        )],
        _ => Vec::new(),
    }
}

fn line_items_valid(record: &EntityRecord, ctx: &RuleContext<'_>) -> Vec<String> {
    let EntityRecord::Transaction(tx) = record else {
        return Vec::new();
    };
    let kind = tx.line_item_kind();
    tx.items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            ctx.validate_nested(kind, item)
                .into_iter()
                .map(move |e| format!("items[{i}]: {e}"))
        })
        .collect()
}

fn total_matches_lines(record: &EntityRecord, _: &RuleContext<'_>) -> Vec<String> {
    let EntityRecord::Transaction(tx) = record else {
        return Vec::new();
    };
    let Some(total) = tx.total else {
        return Vec::new();
    };
    let expected = tx.line_total_sum();
    if amounts_differ(total, expected) {
        vec![format!(
            "total mismatch: expected {expected:.2} (sum of line totals), got {total:.2}"
        )]
    } else {
        Vec::new()
    }
}

fn timestamp_not_future(record: &EntityRecord, ctx: &RuleContext<'_>) -> Vec<String> {
    let EntityRecord::Transaction(tx) = record else {
        return Vec::new();
    };
    match tx.effective_timestamp() {
        Some(ts) if ts.saturating_sub(ctx.now) > FUTURE_SKEW_TOLERANCE_MS => vec![format!(
            "timestamp is {}s in the future (allowed skew is {}s)",
            ts.saturating_sub(ctx.now) / SECOND_MS,
            FUTURE_SKEW_TOLERANCE_MS / SECOND_MS
        )],
        _ => Vec::new(),
    }
}

fn line_total_matches(record: &EntityRecord, _: &RuleContext<'_>) -> Vec<String> {
    let (EntityRecord::PurchaseItem(line) | EntityRecord::SaleItem(line)) = record else {
        return Vec::new();
    };
    match (line.expected_total(), line.total_price) {
        (Some(expected), Some(actual)) if amounts_differ(expected, actual) => vec![format!(
            "totalPrice mismatch: expected {expected:.2} (quantity x unitPrice), got {actual:.2}"
        )],
        _ => Vec::new(),
    }
}
