//! Deterministic conflict resolution.

use crate::strategy::{select_side, Side, Strategy, StrategyRule, DEFAULT_PRIORITY};
use crate::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use till_model::{Conflict, EntityKind, IssueReporter, Record, TracingReporter, LAST_UPDATED};
use tracing::debug;

/// Everything the resolver reads. Both snapshots are borrowed read-only.
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub conflicts: &'a [Conflict],
    pub kind: EntityKind,
    pub local: &'a Record,
    pub remote: &'a Record,
}

/// A conflict settled without human input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoResolved {
    pub field: String,
    /// `None` when the winning side has no value for the field.
    pub value: Option<Value>,
    pub strategy: Strategy,
    pub side: Side,
}

/// Outcome of resolving one detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum Resolution {
    /// Every conflict was settled; `resolved_data` supersedes both inputs.
    #[serde(rename_all = "camelCase")]
    Automatic { resolved_data: Record },
    /// Some conflicts need a human. The UI can pre-fill `auto_resolved` and
    /// ask only about `manual_required`.
    #[serde(rename_all = "camelCase")]
    Manual {
        auto_resolved: Vec<AutoResolved>,
        manual_required: Vec<Conflict>,
    },
}

impl Resolution {
    pub fn is_automatic(&self) -> bool {
        matches!(self, Resolution::Automatic { .. })
    }
}

/// A human decision for one manual-required field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualChoice {
    pub field: String,
    pub choice: Choice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "side", content = "value", rename_all = "camelCase")]
pub enum Choice {
    Local,
    Remote,
    /// A value typed in by the user, taken from neither snapshot.
    Value(Value),
}

/// Resolves conflicts by walking an explicit strategy priority list.
pub struct ConflictResolver {
    priority: Vec<StrategyRule>,
    reporter: Arc<dyn IssueReporter>,
}

impl ConflictResolver {
    /// [`DEFAULT_PRIORITY`], tracing reporter.
    pub fn new() -> Self {
        Self::with_priority(DEFAULT_PRIORITY.to_vec(), Arc::new(TracingReporter))
    }

    pub fn with_priority(priority: Vec<StrategyRule>, reporter: Arc<dyn IssueReporter>) -> Self {
        Self { priority, reporter }
    }

    pub fn priority(&self) -> &[StrategyRule] {
        &self.priority
    }

    /// Resolves every conflict in `request`.
    ///
    /// The result depends only on the request: identical inputs always give
    /// identical resolutions. The merged record is a copy of `local` with
    /// each resolved field overwritten and `lastUpdated` set to the later of
    /// the two snapshots.
    pub fn resolve(&self, request: &ResolveRequest<'_>) -> Resolution {
        let mut auto_resolved = Vec::new();
        let mut manual_required = Vec::new();

        for conflict in request.conflicts {
            match select_side(&self.priority, conflict) {
                Some((strategy, side)) => {
                    debug!(
                        "{}.{} resolved by {:?} to {:?}",
                        request.kind, conflict.field, strategy, side
                    );
                    auto_resolved.push(AutoResolved {
                        field: conflict.field.clone(),
                        value: side_value(conflict, side).cloned(),
                        strategy,
                        side,
                    });
                }
                None => {
                    debug!("{}.{} needs manual resolution", request.kind, conflict.field);
                    manual_required.push(conflict.clone());
                }
            }
        }

        if !manual_required.is_empty() {
            self.reporter
                .manual_resolution_required(request.kind, &manual_required);
            return Resolution::Manual {
                auto_resolved,
                manual_required,
            };
        }

        let mut resolved_data = request.local.clone();
        for resolved in auto_resolved {
            set_field(&mut resolved_data, &resolved.field, resolved.value);
        }
        stamp(&mut resolved_data, request);
        Resolution::Automatic { resolved_data }
    }

    /// Turns a resolution plus human choices into the final record.
    ///
    /// An automatic resolution finalizes to its own record and accepts no
    /// choices. A manual one needs exactly one choice per manual-required
    /// field.
    pub fn finalize(
        &self,
        request: &ResolveRequest<'_>,
        resolution: &Resolution,
        choices: &[ManualChoice],
    ) -> SyncResult<Record> {
        let (auto_resolved, manual_required) = match resolution {
            Resolution::Automatic { resolved_data } => {
                if let Some(choice) = choices.first() {
                    return Err(SyncError::UnknownField(choice.field.clone()));
                }
                return Ok(resolved_data.clone());
            }
            Resolution::Manual {
                auto_resolved,
                manual_required,
            } => (auto_resolved, manual_required),
        };

        let mut by_field: HashMap<&str, &Choice> = HashMap::new();
        for choice in choices {
            if !manual_required.iter().any(|c| c.field == choice.field) {
                return Err(SyncError::UnknownField(choice.field.clone()));
            }
            by_field.insert(choice.field.as_str(), &choice.choice);
        }

        let mut data = request.local.clone();
        for resolved in auto_resolved {
            set_field(&mut data, &resolved.field, resolved.value.clone());
        }
        for conflict in manual_required {
            let value = match by_field.get(conflict.field.as_str()) {
                Some(Choice::Local) => conflict.local_value.clone(),
                Some(Choice::Remote) => conflict.remote_value.clone(),
                Some(Choice::Value(v)) => Some(v.clone()),
                None => return Err(SyncError::UnresolvedField(conflict.field.clone())),
            };
            set_field(&mut data, &conflict.field, value);
        }
        stamp(&mut data, request);
        Ok(data)
    }
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn side_value(conflict: &Conflict, side: Side) -> Option<&Value> {
    match side {
        Side::Local => conflict.local_value.as_ref(),
        Side::Remote => conflict.remote_value.as_ref(),
    }
}

fn set_field(record: &mut Record, field: &str, value: Option<Value>) {
    match value {
        Some(v) => {
            record.insert(field, v);
        }
        None => {
            record.remove(field);
        }
    }
}

/// Sets `lastUpdated` to the later of the two snapshots, when either has one.
fn stamp(record: &mut Record, request: &ResolveRequest<'_>) {
    let latest = request
        .local
        .last_updated()
        .into_iter()
        .chain(request.remote.last_updated())
        .max();
    if let Some(ts) = latest {
        record.insert(LAST_UPDATED, ts);
    }
}
