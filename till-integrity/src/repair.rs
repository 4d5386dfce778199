//! Best-effort recomputation of derivable fields.
//!
//! Repair runs after validation has flagged an inconsistency. It only
//! rewrites fields that are deterministic functions of other present fields
//! and never fills in data it cannot derive. Each change is described in the
//! returned notes.

use crate::CURRENCY_TOLERANCE;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use till_model::{
    EntityKind, IssueReporter, LineItem, Record, RepairOutcome, TracingReporter, Transaction,
};
use tracing::debug;

/// Rewrites `record` in place (a private copy) and returns one note per change.
pub type RepairFn = fn(&mut Record) -> Vec<String>;

#[derive(Debug, Clone, Copy)]
pub struct RepairRule {
    pub name: &'static str,
    pub apply: RepairFn,
}

impl RepairRule {
    pub const fn new(name: &'static str, apply: RepairFn) -> Self {
        Self { name, apply }
    }
}

/// Registry of repair rules keyed by entity kind.
pub struct Repairer {
    rules: HashMap<EntityKind, Vec<RepairRule>>,
    reporter: Arc<dyn IssueReporter>,
}

impl Repairer {
    /// Default repairs, reporting through `tracing`.
    pub fn new() -> Self {
        Self::with_reporter(Arc::new(TracingReporter))
    }

    pub fn with_reporter(reporter: Arc<dyn IssueReporter>) -> Self {
        let mut repairer = Self {
            rules: HashMap::new(),
            reporter,
        };
        for kind in [EntityKind::PurchaseItem, EntityKind::SaleItem] {
            repairer.register(kind, RepairRule::new("line-total", repair_line_total));
        }
        repairer.register(
            EntityKind::Transaction,
            RepairRule::new("transaction-lines", repair_transaction_lines),
        );
        repairer.register(
            EntityKind::Transaction,
            RepairRule::new("transaction-total", repair_transaction_total),
        );
        repairer
    }

    /// Appends a rule for `kind`. Rules run in registration order, each
    /// seeing the output of the previous one.
    pub fn register(&mut self, kind: EntityKind, rule: RepairRule) {
        self.rules.entry(kind).or_default().push(rule);
    }

    /// Returns a repaired copy of `record`. The input is left untouched.
    pub fn repair(&self, kind: EntityKind, record: &Record) -> RepairOutcome {
        let mut data = record.clone();
        let mut repairs = Vec::new();
        for rule in self.rules.get(&kind).map(Vec::as_slice).unwrap_or(&[]) {
            let notes = (rule.apply)(&mut data);
            if !notes.is_empty() {
                debug!("Repair {} changed {} record", rule.name, kind);
            }
            repairs.extend(notes);
        }

        if !repairs.is_empty() {
            self.reporter.repaired(kind, &repairs);
        }
        RepairOutcome {
            repaired: !repairs.is_empty(),
            repairs,
            data,
        }
    }
}

impl Default for Repairer {
    fn default() -> Self {
        Self::new()
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Recomputes `totalPrice` from `quantity * unitPrice` when all three are
/// present and disagree. Returns the note, if any. A product that overflows
/// to a non-finite amount leaves the line untouched.
fn fix_line(line: &mut Record) -> Option<String> {
    let view = LineItem::from_record(line);
    let expected = round_cents(view.expected_total()?);
    if !expected.is_finite() {
        return None;
    }
    let actual = view.total_price?;
    if (expected - actual).abs() <= CURRENCY_TOLERANCE {
        return None;
    }
    line.insert("totalPrice", expected);
    Some(format!("totalPrice recomputed from {actual:.2} to {expected:.2}"))
}

fn repair_line_total(record: &mut Record) -> Vec<String> {
    fix_line(record).into_iter().collect()
}

fn repair_transaction_lines(record: &mut Record) -> Vec<String> {
    let Some(items) = record.get_array("items") else {
        return Vec::new();
    };
    let mut items = items.clone();
    let mut notes = Vec::new();
    for (i, item) in items.iter_mut().enumerate() {
        let Value::Object(map) = item else {
            continue;
        };
        let mut line = Record::from(std::mem::take(map));
        if let Some(note) = fix_line(&mut line) {
            notes.push(format!("items[{i}]: {note}"));
        }
        *item = line.into_value();
    }
    if !notes.is_empty() {
        record.insert("items", items);
    }
    notes
}

fn repair_transaction_total(record: &mut Record) -> Vec<String> {
    let tx = Transaction::from_record(record);
    let Some(total) = tx.total else {
        return Vec::new();
    };
    let lines = tx.line_items();
    if lines.iter().any(|line| line.total_price.is_none()) {
        return Vec::new();
    }
    let expected = round_cents(tx.line_total_sum());
    if !expected.is_finite() {
        return Vec::new();
    }
    if (expected - total).abs() <= CURRENCY_TOLERANCE {
        return Vec::new();
    }
    record.insert("total", expected);
    vec![format!(
        "total recomputed from {total:.2} to {expected:.2} (sum of {} line item(s))",
        lines.len()
    )]
}
