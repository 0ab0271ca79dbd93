//! Crate configuration.
//!
//! ```toml
//! [prune]
//! mode = "shallow"   # or "full"
//! min_age = "1 week" # omit to prune every completed tour
//! ```

use crate::error::{Result, TourError};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypostConfig {
    pub prune: PruneConfig,
}

impl WaypostConfig {
    /// Parse configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| TourError::Configuration(e.to_string()))
    }
}

/// Settings for removing completed tours.
///
/// Values are kept as written and validated when the pruner runs, so a bad
/// value surfaces as [`TourError::Configuration`] from the prune path only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// `"shallow"` removes the steps of a tour, `"full"` removes the tour.
    pub mode: String,
    /// Minimum time since completion, e.g. `"2 weeks"`. `None` means no floor.
    pub min_age: Option<String>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            mode: "shallow".to_string(),
            min_age: Some("1 week".to_string()),
        }
    }
}

impl PruneConfig {
    pub fn new(mode: impl Into<String>, min_age: Option<&str>) -> Self {
        Self {
            mode: mode.into(),
            min_age: min_age.map(str::to_string),
        }
    }

    /// The configured minimum age, parsed.
    pub fn min_age(&self) -> Result<Option<Duration>> {
        self.min_age.as_deref().map(parse_age).transpose()
    }
}

/// Parse an age such as `"1 week"`, `"30 days"` or `"0 seconds"`.
///
/// Months count as 30 days and years as 365 days.
pub fn parse_age(text: &str) -> Result<Duration> {
    let invalid = || TourError::Configuration(format!("invalid age '{text}'"));

    let mut parts = text.split_whitespace();
    let amount: i64 = parts
        .next()
        .and_then(|n| n.parse().ok())
        .filter(|n| *n >= 0)
        .ok_or_else(invalid)?;
    let unit = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }

    let unit = unit.to_ascii_lowercase();
    let per_unit = match unit.strip_suffix('s').unwrap_or(&unit) {
        "second" => Duration::seconds(1),
        "minute" => Duration::minutes(1),
        "hour" => Duration::hours(1),
        "day" => Duration::days(1),
        "week" => Duration::weeks(1),
        "month" => Duration::days(30),
        "year" => Duration::days(365),
        _ => return Err(invalid()),
    };

    i32::try_from(amount)
        .ok()
        .and_then(|n| per_unit.checked_mul(n))
        .ok_or_else(invalid)
}
