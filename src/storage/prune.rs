//! Removal of completed tours.
//!
//! Pruning is never triggered by navigation. A scheduler (cron job, admin
//! task) builds a [`Pruner`] and calls [`Pruner::prune`].

use super::TourStore;
use crate::config::PruneConfig;
use crate::core::TourId;
use crate::error::{Result, TourError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// What gets removed for each prunable tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PruneMode {
    /// Remove the tour's steps, keep the tour record.
    Shallow,
    /// Remove the tour record together with its steps.
    Full,
}

impl FromStr for PruneMode {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "shallow" => Ok(Self::Shallow),
            "full" => Ok(Self::Full),
            other => Err(TourError::Configuration(format!(
                "invalid prune mode: should be either 'shallow' or 'full', received '{other}'"
            ))),
        }
    }
}

impl fmt::Display for PruneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shallow => f.write_str("shallow"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// Outcome of one pruning pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PruneReport {
    pub mode: PruneMode,
    pub cutoff: DateTime<Utc>,
    pub pruned: Vec<TourId>,
    pub steps_removed: usize,
}

/// Deletes steps (shallow) or whole tours (full) of completed tours that
/// are older than the configured minimum age.
pub struct Pruner {
    store: Arc<dyn TourStore>,
    config: PruneConfig,
}

impl Pruner {
    pub fn new(store: Arc<dyn TourStore>, config: PruneConfig) -> Self {
        Self { store, config }
    }

    pub fn prune(&self) -> Result<PruneReport> {
        self.prune_at(Utc::now())
    }

    /// Prune relative to `now`. Configuration is validated before anything
    /// is deleted.
    pub fn prune_at(&self, now: DateTime<Utc>) -> Result<PruneReport> {
        let mode: PruneMode = self.config.mode.parse()?;
        let cutoff = match self.config.min_age()? {
            Some(age) => now
                .checked_sub_signed(age)
                .ok_or_else(|| TourError::Configuration("minimum age out of range".into()))?,
            None => now,
        };

        let mut report = PruneReport {
            mode,
            cutoff,
            pruned: Vec::new(),
            steps_removed: 0,
        };

        for mut tour in self.store.find_prunable(cutoff)? {
            if tour.current_step.take().is_some() {
                self.store.save_tour(&tour)?;
            }
            match mode {
                PruneMode::Shallow => {
                    report.steps_removed += self.store.delete_steps_of_tour(tour.id)?;
                }
                PruneMode::Full => {
                    report.steps_removed += self.store.load_steps(tour.id)?.len();
                    self.store.delete_tour(tour.id)?;
                }
            }
            debug!(tour_id = %tour.id, tour = %tour.name, %mode, "pruned tour");
            report.pruned.push(tour.id);
        }

        info!(
            %mode,
            %cutoff,
            tours = report.pruned.len(),
            steps = report.steps_removed,
            "prune pass finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TourStatus;
    use crate::storage::InMemoryTourStore;
    use chrono::Duration;

    fn completed_tour(store: &InMemoryTourStore, name: &str, at: DateTime<Utc>) -> TourId {
        let mut tour = store.create_tour(name, None).unwrap();
        let step = store.create_step(tour.id, "only").unwrap();
        tour.status = TourStatus::Completed;
        tour.completed_at = Some(at);
        tour.current_step = Some(step.id);
        store.save_tour(&tour).unwrap();
        tour.id
    }

    #[test]
    fn invalid_mode_fails_before_deleting() {
        let store = Arc::new(InMemoryTourStore::new());
        completed_tour(&store, "t", Utc::now() - Duration::days(60));

        let pruner = Pruner::new(store.clone(), PruneConfig::new("invalid", None));
        assert!(matches!(pruner.prune(), Err(TourError::Configuration(_))));
        assert_eq!(store.list_tours().unwrap().len(), 1);
        assert_eq!(store.step_count().unwrap(), 1);
    }

    #[test]
    fn invalid_min_age_is_a_configuration_error() {
        let store = Arc::new(InMemoryTourStore::new());
        let pruner = Pruner::new(store, PruneConfig::new("full", Some("soon")));
        assert!(matches!(pruner.prune(), Err(TourError::Configuration(_))));
    }

    #[test]
    fn clears_current_step_before_shallow_delete() {
        let store = Arc::new(InMemoryTourStore::new());
        let id = completed_tour(&store, "t", Utc::now() - Duration::days(60));

        let report = Pruner::new(store.clone(), PruneConfig::new("shallow", Some("1 week")))
            .prune()
            .unwrap();

        assert_eq!(report.pruned, vec![id]);
        assert_eq!(report.steps_removed, 1);
        let tour = store.refresh_tour(id).unwrap();
        assert!(tour.current_step.is_none());
        assert!(store.load_steps(id).unwrap().is_empty());
    }

    #[test]
    fn mode_parses_known_values() {
        assert_eq!("shallow".parse::<PruneMode>().unwrap(), PruneMode::Shallow);
        assert_eq!("full".parse::<PruneMode>().unwrap(), PruneMode::Full);
        assert!("Full".parse::<PruneMode>().is_err());
    }
}
