//! In-memory [`TourStore`] for tests, demos and embedding.
//!
//! Not durable. Ids are assigned from per-table counters starting at 1,
//! mirroring auto-increment keys.

use super::{StepLookup, StepRecord, TourRecord, TourStore};
use crate::core::{OwnerRef, StepId, TourId, TourStatus};
use crate::error::{Result, TourError};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    tours: BTreeMap<TourId, TourRecord>,
    steps: BTreeMap<StepId, StepRecord>,
    last_tour_id: i64,
    last_step_id: i64,
}

/// Store keeping tours and steps in ordered maps behind a mutex.
#[derive(Default)]
pub struct InMemoryTourStore {
    tables: Mutex<Tables>,
}

impl InMemoryTourStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|e| TourError::Storage(format!("mutex poisoned: {e}")))
    }

    /// Number of stored steps across all tours.
    pub fn step_count(&self) -> Result<usize> {
        Ok(self.lock()?.steps.len())
    }
}

impl TourStore for InMemoryTourStore {
    fn create_tour(&self, name: &str, owner: Option<&OwnerRef>) -> Result<TourRecord> {
        let mut tables = self.lock()?;
        tables.last_tour_id += 1;
        let now = Utc::now();
        let record = TourRecord {
            id: TourId(tables.last_tour_id),
            name: name.to_string(),
            owner: owner.cloned(),
            status: TourStatus::Created,
            context: None,
            current_step: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.tours.insert(record.id, record.clone());
        Ok(record)
    }

    fn save_tour(&self, record: &TourRecord) -> Result<()> {
        let mut tables = self.lock()?;
        if let Some(step_id) = record.current_step {
            let belongs = tables
                .steps
                .get(&step_id)
                .is_some_and(|step| step.tour_id == record.id);
            if !belongs {
                return Err(TourError::Storage(format!(
                    "current step {step_id} is not a step of tour {}",
                    record.id
                )));
            }
        }
        let stored = tables
            .tours
            .get_mut(&record.id)
            .ok_or_else(|| TourError::NotFound(format!("tour {}", record.id)))?;
        stored.owner = record.owner.clone();
        stored.status = record.status.persisted();
        stored.context = record.context.clone();
        stored.current_step = record.current_step;
        stored.completed_at = record.completed_at;
        stored.updated_at = Utc::now();
        Ok(())
    }

    fn refresh_tour(&self, id: TourId) -> Result<TourRecord> {
        self.lock()?
            .tours
            .get(&id)
            .cloned()
            .ok_or_else(|| TourError::NotFound(format!("tour {id}")))
    }

    fn find_tour_by_id(&self, id: TourId) -> Result<Option<TourRecord>> {
        Ok(self.lock()?.tours.get(&id).cloned())
    }

    fn find_tour_by_name(&self, name: &str, owner: Option<&OwnerRef>) -> Result<Option<TourRecord>> {
        let tables = self.lock()?;
        let found = tables.tours.values().find(|tour| {
            tour.name == name && owner.map_or(true, |o| tour.owner.as_ref() == Some(o))
        });
        Ok(found.cloned())
    }

    fn list_tours(&self) -> Result<Vec<TourRecord>> {
        Ok(self.lock()?.tours.values().cloned().collect())
    }

    fn create_step(&self, tour_id: TourId, name: &str) -> Result<StepRecord> {
        let mut tables = self.lock()?;
        if !tables.tours.contains_key(&tour_id) {
            return Err(TourError::NotFound(format!("tour {tour_id}")));
        }
        tables.last_step_id += 1;
        let now = Utc::now();
        let record = StepRecord {
            id: StepId(tables.last_step_id),
            name: name.to_string(),
            tour_id,
            created_at: now,
            updated_at: now,
        };
        tables.steps.insert(record.id, record.clone());
        Ok(record)
    }

    fn load_steps(&self, tour_id: TourId) -> Result<Vec<StepRecord>> {
        let tables = self.lock()?;
        Ok(tables
            .steps
            .values()
            .filter(|step| step.tour_id == tour_id)
            .cloned()
            .collect())
    }

    fn find_step(&self, tour_id: TourId, lookup: &StepLookup) -> Result<Option<StepRecord>> {
        let tables = self.lock()?;
        let found = match lookup {
            StepLookup::Id(id) => tables.steps.get(id).filter(|s| s.tour_id == tour_id),
            StepLookup::Name(name) => tables
                .steps
                .values()
                .find(|s| s.tour_id == tour_id && &s.name == name),
        };
        Ok(found.cloned())
    }

    fn find_prunable(&self, cutoff: DateTime<Utc>) -> Result<Vec<TourRecord>> {
        let tables = self.lock()?;
        Ok(tables
            .tours
            .values()
            .filter(|tour| tour.status == TourStatus::Completed)
            .filter(|tour| tour.completed_at.is_some_and(|at| at <= cutoff))
            .cloned()
            .collect())
    }

    fn delete_steps_of_tour(&self, tour_id: TourId) -> Result<usize> {
        let mut tables = self.lock()?;
        if tables
            .tours
            .get(&tour_id)
            .is_some_and(|tour| tour.current_step.is_some())
        {
            return Err(TourError::Storage(format!(
                "tour {tour_id} still references one of its steps"
            )));
        }
        let before = tables.steps.len();
        tables.steps.retain(|_, step| step.tour_id != tour_id);
        Ok(before - tables.steps.len())
    }

    fn delete_tour(&self, tour_id: TourId) -> Result<()> {
        let mut tables = self.lock()?;
        tables
            .tours
            .remove(&tour_id)
            .ok_or_else(|| TourError::NotFound(format!("tour {tour_id}")))?;
        tables.steps.retain(|_, step| step.tour_id != tour_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn ids_are_assigned_sequentially() {
        let store = InMemoryTourStore::new();
        let first = store.create_tour("a", None).unwrap();
        let second = store.create_tour("b", None).unwrap();
        assert_eq!(first.id, TourId(1));
        assert_eq!(second.id, TourId(2));
        assert_eq!(first.status, TourStatus::Created);
        assert!(first.context.is_none());
    }

    #[test]
    fn save_collapses_restarted_status() {
        let store = InMemoryTourStore::new();
        let mut tour = store.create_tour("a", None).unwrap();
        tour.status = TourStatus::Restarted;
        store.save_tour(&tour).unwrap();
        assert_eq!(store.refresh_tour(tour.id).unwrap().status, TourStatus::Started);
    }

    #[test]
    fn save_rejects_foreign_current_step() {
        let store = InMemoryTourStore::new();
        let mut a = store.create_tour("a", None).unwrap();
        let b = store.create_tour("b", None).unwrap();
        let step = store.create_step(b.id, "s1").unwrap();
        a.current_step = Some(step.id);
        assert!(matches!(store.save_tour(&a), Err(TourError::Storage(_))));
    }

    #[test]
    fn find_by_name_filters_owner() {
        let store = InMemoryTourStore::new();
        let alice = OwnerRef::new("user", 1);
        let bob = OwnerRef::new("user", 2);
        store.create_tour("intro", Some(&alice)).unwrap();

        assert!(store.find_tour_by_name("intro", None).unwrap().is_some());
        assert!(store.find_tour_by_name("intro", Some(&alice)).unwrap().is_some());
        assert!(store.find_tour_by_name("intro", Some(&bob)).unwrap().is_none());
    }

    #[test]
    fn steps_load_in_insertion_order() {
        let store = InMemoryTourStore::new();
        let tour = store.create_tour("a", None).unwrap();
        let other = store.create_tour("b", None).unwrap();
        store.create_step(tour.id, "one").unwrap();
        store.create_step(other.id, "elsewhere").unwrap();
        store.create_step(tour.id, "two").unwrap();

        let names: Vec<_> = store
            .load_steps(tour.id)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn find_step_is_scoped_to_tour() {
        let store = InMemoryTourStore::new();
        let tour = store.create_tour("a", None).unwrap();
        let other = store.create_tour("b", None).unwrap();
        let step = store.create_step(other.id, "x").unwrap();

        assert!(store.find_step(tour.id, &StepLookup::Id(step.id)).unwrap().is_none());
        assert!(store
            .find_step(other.id, &StepLookup::Name("x".into()))
            .unwrap()
            .is_some());
    }

    #[test]
    fn prunable_requires_completion_time_before_cutoff() {
        let store = InMemoryTourStore::new();
        let now = Utc::now();

        let mut old = store.create_tour("old", None).unwrap();
        old.status = TourStatus::Completed;
        old.completed_at = Some(now - Duration::days(30));
        store.save_tour(&old).unwrap();

        let mut recent = store.create_tour("recent", None).unwrap();
        recent.status = TourStatus::Completed;
        recent.completed_at = Some(now);
        store.save_tour(&recent).unwrap();

        let mut undated = store.create_tour("undated", None).unwrap();
        undated.status = TourStatus::Completed;
        store.save_tour(&undated).unwrap();

        let prunable = store.find_prunable(now - Duration::days(7)).unwrap();
        assert_eq!(prunable.len(), 1);
        assert_eq!(prunable[0].name, "old");
    }

    #[test]
    fn delete_tour_cascades_to_steps() {
        let store = InMemoryTourStore::new();
        let tour = store.create_tour("a", None).unwrap();
        store.create_step(tour.id, "s1").unwrap();
        store.create_step(tour.id, "s2").unwrap();

        store.delete_tour(tour.id).unwrap();

        assert!(store.find_tour_by_id(tour.id).unwrap().is_none());
        assert_eq!(store.step_count().unwrap(), 0);
    }
}
