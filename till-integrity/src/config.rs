use serde::{Deserialize, Serialize};
use till_types::{Millis, YEAR_MS};

/// Host-tunable validation settings.
///
/// The currency tolerance and the transaction clock-skew bound are constants
/// (see [`CURRENCY_TOLERANCE`](crate::CURRENCY_TOLERANCE)), not settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Timestamp fields further than this from "now", in either direction,
    /// produce a warning.
    pub timestamp_warning_window_ms: Millis,
    /// Whether failed validations are forwarded to the injected reporter.
    pub report_failures: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            timestamp_warning_window_ms: YEAR_MS,
            report_failures: true,
        }
    }
}

impl ValidationConfig {
    /// Loads a config from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
