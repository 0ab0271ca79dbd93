//! Tour lifecycle status.

use super::state::State;
use crate::error::TourError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a tour.
///
/// `Restarted` is only ever a *requested* status: it shows up in
/// notifications so observers can tell a restart from a first start, but
/// it is persisted as `Started` (see [`TourStatus::persisted`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    Created,
    Started,
    Restarted,
    Completed,
    Cancelled,
    Failed,
}

impl TourStatus {
    /// Every status, in declaration order.
    pub const ALL: [TourStatus; 6] = [
        TourStatus::Created,
        TourStatus::Started,
        TourStatus::Restarted,
        TourStatus::Completed,
        TourStatus::Cancelled,
        TourStatus::Failed,
    ];

    /// Status tags in declaration order, as stored by persistence layers.
    pub fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Restarted => "restarted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    /// Whether steps may still be navigated in this status.
    pub fn is_mutable(&self) -> bool {
        matches!(self, Self::Created | Self::Started)
    }

    /// The status value that is actually stored for a requested status.
    pub fn persisted(self) -> Self {
        match self {
            Self::Restarted => Self::Started,
            other => other,
        }
    }
}

impl State for TourStatus {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TourStatus {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TourError::InvalidArgument(format!("unknown tour status '{s}'")))
    }
}
