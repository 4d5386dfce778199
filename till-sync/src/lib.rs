//! Conflict detection and resolution for offline-first entity sync.
//!
//! The transport layer fetches a local and a remote snapshot of the same
//! entity. This crate decides what disagrees and, where it can, which side
//! wins. It never decides when to sync, never retries, and never writes to
//! storage.
//!
//! # Components
//!
//! - **Detector** ([`ConflictDetector`]): compares every schema field of the
//!   two snapshots with structural equality and lists the disagreements.
//! - **Strategies** ([`Strategy`], [`StrategyRule`], [`DEFAULT_PRIORITY`]):
//!   an explicit, ordered rule list. The first rule whose field pattern
//!   matches and whose strategy can pick a side wins.
//! - **Resolver** ([`ConflictResolver`]): applies the rule list to every
//!   conflict and returns either a fully merged record or the split between
//!   auto-resolved and manual-required fields.
//! - **Reconciler** ([`Reconciler`]): detect-then-resolve in one call, with
//!   unknown kinds turned into errors.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use till_model::Record;
//! use till_sync::{Reconciler, Resolution};
//!
//! let local = Record::from_value(json!({"id": "i1", "currentStock": 5, "lastUpdated": 200})).unwrap();
//! let remote = Record::from_value(json!({"id": "i1", "currentStock": 8, "lastUpdated": 100})).unwrap();
//!
//! let resolution = Reconciler::new().reconcile(&local, &remote, "ingredient").unwrap();
//! let Resolution::Automatic { resolved_data } = resolution else { panic!("expected automatic") };
//! assert_eq!(resolved_data.get_number("currentStock"), Some(5.0));
//! assert_eq!(resolved_data.last_updated(), Some(200));
//! ```

mod detector;
mod error;
mod reconcile;
mod resolver;
mod strategy;

pub use detector::ConflictDetector;
pub use error::{SyncError, SyncResult};
pub use reconcile::Reconciler;
pub use resolver::{AutoResolved, Choice, ConflictResolver, ManualChoice, Resolution, ResolveRequest};
pub use strategy::{select_side, FieldPattern, Side, Strategy, StrategyRule, DEFAULT_PRIORITY};
