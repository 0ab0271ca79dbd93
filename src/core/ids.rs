//! Store-assigned identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a stored tour, assigned by the store on first persist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourId(pub i64);

/// Identity of a stored tour step, assigned by the store on first persist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub i64);

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TourId {
    fn from(id: i64) -> Self {
        TourId(id)
    }
}

impl From<i64> for StepId {
    fn from(id: i64) -> Self {
        StepId(id)
    }
}
