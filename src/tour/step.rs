//! A single step of a tour.

use super::Tour;
use crate::core::{StepId, TourId};
use crate::storage::StepRecord;
use serde::{Deserialize, Serialize};

/// One step of a tour.
///
/// A step belongs to exactly one tour for its whole life and is never
/// modified after creation. Adjacency queries take the owning [`Tour`]
/// and are answered from its in-memory [`StepSequence`](super::StepSequence),
/// whose compile order is authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourStep {
    id: StepId,
    name: String,
    tour_id: TourId,
}

impl TourStep {
    pub(crate) fn from_record(record: &StepRecord) -> Self {
        Self::from_parts(record.id, &record.name, record.tour_id)
    }

    pub(crate) fn from_parts(id: StepId, name: &str, tour_id: TourId) -> Self {
        Self {
            id,
            name: name.to_string(),
            tour_id,
        }
    }

    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the owning tour.
    pub fn tour_id(&self) -> TourId {
        self.tour_id
    }

    /// The step right after this one in `tour`, or `None` if this is the
    /// last step or `tour` does not own this step.
    pub fn next<'a>(&self, tour: &'a Tour) -> Option<&'a TourStep> {
        if tour.id() != self.tour_id {
            return None;
        }
        tour.steps().after(|key, _| key == self.name)
    }

    /// The step right before this one in `tour`, or `None` if this is the
    /// first step or `tour` does not own this step.
    pub fn previous<'a>(&self, tour: &'a Tour) -> Option<&'a TourStep> {
        if tour.id() != self.tour_id {
            return None;
        }
        tour.steps().before(|key, _| key == self.name)
    }
}
