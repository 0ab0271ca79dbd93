//! Storage collaborator contract.
//!
//! The tour core owns no schema: it reads and writes [`TourRecord`] and
//! [`StepRecord`] values through a [`TourStore`]. Stores assign ids and
//! maintain timestamps. The expected persisted layout is a tour table
//! (`id, name, owner_type, owner_id, status, context, current_step_id,
//! completed_at, created_at, updated_at`) and a step table (`id, name,
//! tour_id, created_at, updated_at`) whose rows are cascade-deleted with
//! their tour.

use crate::core::{OwnerRef, StepId, TourId, TourStatus};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

mod memory;
mod prune;

pub use memory::InMemoryTourStore;
pub use prune::{PruneMode, PruneReport, Pruner};

/// Stored representation of a tour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourRecord {
    pub id: TourId,
    pub name: String,
    pub owner: Option<OwnerRef>,
    /// Never `Restarted`; see [`TourStatus::persisted`].
    pub status: TourStatus,
    pub context: Option<JsonValue>,
    pub current_step: Option<StepId>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored representation of a tour step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub id: StepId,
    pub name: String,
    pub tour_id: TourId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lookup of a step within one tour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepLookup {
    Id(StepId),
    Name(String),
}

/// Contract for persisting tours and their steps.
///
/// Calls are synchronous and blocking. Implementations decide their own
/// concurrency policy; the core serializes calls per tour instance.
pub trait TourStore: Send + Sync {
    /// Insert a tour with status `Created`, no context, no current step
    /// and no completion time.
    fn create_tour(&self, name: &str, owner: Option<&OwnerRef>) -> Result<TourRecord>;

    /// Persist the mutable fields of an existing tour.
    fn save_tour(&self, record: &TourRecord) -> Result<()>;

    /// Re-read a tour as currently stored.
    fn refresh_tour(&self, id: TourId) -> Result<TourRecord>;

    fn find_tour_by_id(&self, id: TourId) -> Result<Option<TourRecord>>;

    /// First tour (lowest id) with this name, restricted to `owner` when given.
    fn find_tour_by_name(&self, name: &str, owner: Option<&OwnerRef>) -> Result<Option<TourRecord>>;

    /// All stored tours in id order.
    fn list_tours(&self) -> Result<Vec<TourRecord>>;

    /// Insert a step belonging to `tour_id`.
    fn create_step(&self, tour_id: TourId, name: &str) -> Result<StepRecord>;

    /// Steps of a tour in insertion order.
    fn load_steps(&self, tour_id: TourId) -> Result<Vec<StepRecord>>;

    fn find_step(&self, tour_id: TourId, lookup: &StepLookup) -> Result<Option<StepRecord>>;

    /// Completed tours whose completion time is at or before `cutoff`.
    fn find_prunable(&self, cutoff: DateTime<Utc>) -> Result<Vec<TourRecord>>;

    /// Delete every step of a tour, returning how many were removed.
    fn delete_steps_of_tour(&self, tour_id: TourId) -> Result<usize>;

    /// Delete a tour together with its steps.
    fn delete_tour(&self, tour_id: TourId) -> Result<()>;
}
