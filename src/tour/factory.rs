//! Construction and lookup of tours.

use super::definition::{ResolvedTour, TourDefinition, TourRegistry};
use super::Tour;
use crate::core::{OwnerRef, TourId, TourStatus, Tourable};
use crate::error::{Result, TourError};
use crate::events::{EventNotifier, TourChange};
use crate::storage::TourStore;
use std::sync::Arc;
use tracing::debug;

/// How to look a tour up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TourLookup {
    Id(TourId),
    Name(String),
}

impl From<TourId> for TourLookup {
    fn from(id: TourId) -> Self {
        TourLookup::Id(id)
    }
}

impl From<i64> for TourLookup {
    fn from(id: i64) -> Self {
        TourLookup::Id(TourId(id))
    }
}

impl From<&str> for TourLookup {
    fn from(name: &str) -> Self {
        TourLookup::Name(name.to_string())
    }
}

impl From<String> for TourLookup {
    fn from(name: String) -> Self {
        TourLookup::Name(name)
    }
}

/// Entry point for making and finding tours.
///
/// Carries the collaborators every tour it produces talks to: the store,
/// the notifier and the template registry. Cloning is cheap.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use waypost::core::TourStatus;
/// use waypost::events::NoopNotifier;
/// use waypost::storage::InMemoryTourStore;
/// use waypost::tour::TourFactory;
///
/// let factory = TourFactory::new(Arc::new(InMemoryTourStore::new()), Arc::new(NoopNotifier));
///
/// let mut tour = factory.make_unowned("t").unwrap();
/// tour.add_steps(["s1", "s2"]).unwrap();
/// assert!(tour.current().is_none());
///
/// tour.start().unwrap();
/// assert_eq!(tour.current().unwrap().name(), "s1");
/// tour.next().unwrap();
/// assert_eq!(tour.current().unwrap().name(), "s2");
/// tour.next().unwrap();
/// assert!(tour.current().is_none());
/// assert_eq!(tour.status(), TourStatus::Completed);
/// ```
#[derive(Clone)]
pub struct TourFactory {
    pub(crate) store: Arc<dyn TourStore>,
    pub(crate) notifier: Arc<dyn EventNotifier>,
    pub(crate) registry: Arc<TourRegistry>,
}

impl TourFactory {
    /// Factory over `store` and `notifier` with an empty registry.
    pub fn new(store: Arc<dyn TourStore>, notifier: Arc<dyn EventNotifier>) -> Self {
        Self {
            store,
            notifier,
            registry: Arc::new(TourRegistry::new()),
        }
    }

    /// Resolve definitions against `registry` instead.
    pub fn with_registry(mut self, registry: TourRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// The store tours are persisted to.
    pub fn store(&self) -> &Arc<dyn TourStore> {
        &self.store
    }

    /// Templates used to resolve definitions.
    pub fn registry(&self) -> &TourRegistry {
        &self.registry
    }

    /// Make a tour owned by `owner`.
    ///
    /// Fails with [`TourError::InvalidArgument`] when the definition cannot
    /// be resolved, resolves to an empty name, is a typed definition that is
    /// not ownable, or when `owner` yields an unusable reference.
    pub fn make(&self, definition: impl Into<TourDefinition>, owner: &impl Tourable) -> Result<Tour> {
        let resolved = self.registry.resolve_tour(definition.into())?;
        if !resolved.by_name && !resolved.ownable {
            return Err(TourError::InvalidArgument(format!(
                "cannot make owned tour: expected an ownable tour, got '{}'",
                resolved.name
            )));
        }
        let owner = owner.owner_ref();
        owner.validate()?;
        self.create(resolved, Some(owner))
    }

    /// Make a tour without an owner. Ownable definitions are rejected.
    pub fn make_unowned(&self, definition: impl Into<TourDefinition>) -> Result<Tour> {
        let resolved = self.registry.resolve_tour(definition.into())?;
        if resolved.ownable {
            return Err(TourError::InvalidArgument(format!(
                "cannot make unowned tour: '{}' requires an owner",
                resolved.name
            )));
        }
        self.create(resolved, None)
    }

    /// Find a tour by id or name, regardless of owner.
    pub fn find(&self, lookup: impl Into<TourLookup>) -> Result<Option<Tour>> {
        self.lookup(lookup.into(), None)
    }

    /// Find a tour by id or name that belongs to `owner`.
    pub fn find_owned(&self, lookup: impl Into<TourLookup>, owner: &impl Tourable) -> Result<Option<Tour>> {
        let owner = owner.owner_ref();
        owner.validate()?;
        self.lookup(lookup.into(), Some(&owner))
    }

    fn lookup(&self, lookup: TourLookup, owner: Option<&OwnerRef>) -> Result<Option<Tour>> {
        let record = match lookup {
            TourLookup::Id(id) => self
                .store
                .find_tour_by_id(id)?
                .filter(|record| owner.map_or(true, |o| record.owner.as_ref() == Some(o))),
            TourLookup::Name(name) => self.store.find_tour_by_name(&name, owner)?,
        };

        record
            .map(|record| Tour::rehydrate(record, self.clone()))
            .transpose()
    }

    fn create(&self, resolved: ResolvedTour, owner: Option<OwnerRef>) -> Result<Tour> {
        let step_names = resolved
            .steps
            .iter()
            .map(|step| self.registry.resolve_step(&resolved.name, step))
            .collect::<Result<Vec<_>>>()?;

        let record = self.store.create_tour(&resolved.name, owner.as_ref())?;
        debug!(tour_id = %record.id, tour = %record.name, owner = ?owner, "stored new tour");

        let mut tour = Tour::new(record, self.clone());
        for name in &step_names {
            tour.insert_step(name)?;
        }
        tour.refresh()?;

        let before = tour.status();
        tour.notify(TourChange::StatusChanged {
            before,
            after: TourStatus::Created,
        })?;
        Ok(tour)
    }
}
