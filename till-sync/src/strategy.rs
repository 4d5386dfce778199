//! Automatic resolution strategies and their priority order.
//!
//! The order is data, not control flow: [`DEFAULT_PRIORITY`] lists rules
//! from highest to lowest priority, and [`select_side`] walks it. Each
//! [`Strategy`] can be tested on its own against a single [`Conflict`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use till_model::Conflict;

/// Which snapshot a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Local,
    Remote,
}

/// A deterministic way to pick one side of a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Larger timestamp wins. Declines on a tie.
    MostRecentWins,
    /// On a timestamp tie between two numbers, the larger number wins.
    NumericMaxWins,
    /// On a timestamp tie, `true` beats anything else.
    BooleanOr,
    /// On a timestamp tie, the only non-blank string wins. Declines when
    /// both sides are non-blank.
    NonEmptyStringWins,
}

impl Strategy {
    /// Picks a side, or `None` when this strategy does not apply.
    pub fn apply(&self, conflict: &Conflict) -> Option<Side> {
        let local = conflict.local_value.as_ref();
        let remote = conflict.remote_value.as_ref();
        match self {
            Strategy::MostRecentWins => {
                match conflict.local_timestamp.cmp(&conflict.remote_timestamp) {
                    Ordering::Greater => Some(Side::Local),
                    Ordering::Less => Some(Side::Remote),
                    Ordering::Equal => None,
                }
            }
            Strategy::NumericMaxWins => {
                if !conflict.timestamps_tied() {
                    return None;
                }
                let (Some(Value::Number(l)), Some(Value::Number(r))) = (local, remote) else {
                    return None;
                };
                let (l, r) = (l.as_f64()?, r.as_f64()?);
                Some(if l >= r { Side::Local } else { Side::Remote })
            }
            Strategy::BooleanOr => {
                if !conflict.timestamps_tied() {
                    return None;
                }
                match (local, remote) {
                    (Some(Value::Bool(true)), _) => Some(Side::Local),
                    (_, Some(Value::Bool(true))) => Some(Side::Remote),
                    _ => None,
                }
            }
            Strategy::NonEmptyStringWins => {
                if !conflict.timestamps_tied() || !(stringish(local) && stringish(remote)) {
                    return None;
                }
                match (non_blank(local), non_blank(remote)) {
                    (true, false) => Some(Side::Local),
                    (false, true) => Some(Side::Remote),
                    _ => None,
                }
            }
        }
    }
}

/// A string, or no value at all.
fn stringish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::String(_)))
}

fn non_blank(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// Which fields a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPattern {
    Any,
    Named(&'static [&'static str]),
}

impl FieldPattern {
    pub fn matches(&self, field: &str) -> bool {
        match self {
            FieldPattern::Any => true,
            FieldPattern::Named(names) => names.iter().any(|name| *name == field),
        }
    }
}

/// One entry of a priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyRule {
    pub strategy: Strategy,
    pub fields: FieldPattern,
}

impl StrategyRule {
    pub const fn new(strategy: Strategy, fields: FieldPattern) -> Self {
        Self { strategy, fields }
    }

    pub fn apply(&self, conflict: &Conflict) -> Option<Side> {
        if self.fields.matches(&conflict.field) {
            self.strategy.apply(conflict)
        } else {
            None
        }
    }
}

/// The default rule list, highest priority first.
pub const DEFAULT_PRIORITY: &[StrategyRule] = &[
    StrategyRule::new(Strategy::MostRecentWins, FieldPattern::Any),
    StrategyRule::new(
        Strategy::NumericMaxWins,
        FieldPattern::Named(&["currentStock", "quantity"]),
    ),
    StrategyRule::new(Strategy::BooleanOr, FieldPattern::Named(&["isActive"])),
    StrategyRule::new(Strategy::NonEmptyStringWins, FieldPattern::Any),
];

/// First rule in `priority` that resolves `conflict`.
pub fn select_side(priority: &[StrategyRule], conflict: &Conflict) -> Option<(Strategy, Side)> {
    priority
        .iter()
        .find_map(|rule| rule.apply(conflict).map(|side| (rule.strategy, side)))
}
