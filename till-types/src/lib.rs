//! Core type definitions for the till data-integrity engine.
//!
//! This crate defines the plugin-agnostic time primitives used throughout
//! the engine:
//! - [`Millis`] timestamps (milliseconds since the Unix epoch, the unit every
//!   record carries in `lastUpdated` / `createdAt`)
//! - The [`Clock`] trait, so "now" is injected rather than read globally
//! - Lenient timestamp parsing for untyped record values

mod clock;
mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use timestamp::{parse_timestamp, Millis, DAY_MS, MINUTE_MS, SECOND_MS, YEAR_MS};
