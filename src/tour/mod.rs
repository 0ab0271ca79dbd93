//! The tour aggregate and its steps.
//!
//! A [`Tour`] owns its [`StepSequence`], tracks a status and a current-step
//! pointer, and reports every change to the factory's
//! [`EventNotifier`](crate::events::EventNotifier). Tours are created and
//! rehydrated through a [`TourFactory`].
//!
//! Operations run their guard first and fail without side effects when it
//! does not hold. Past the guard, persistence and notification happen in
//! sequence; a failure in either is returned as-is and nothing already
//! written is undone.

mod definition;
mod factory;
mod sequence;
mod step;

pub use definition::{StepDefinition, StepTemplate, TourDefinition, TourRegistry, TourTemplate};
pub use factory::{TourFactory, TourLookup};
pub use sequence::StepSequence;
pub use step::TourStep;

use crate::core::{Guard, OwnerRef, StepId, TourId, TourStatus};
use crate::error::{Result, TourError};
use crate::events::TourChange;
use crate::storage::{StepLookup, TourRecord};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Key for looking a step up within a tour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepKey {
    Name(String),
    Id(StepId),
    /// Zero-based position in compile order.
    Position(usize),
}

impl From<&str> for StepKey {
    fn from(name: &str) -> Self {
        StepKey::Name(name.to_string())
    }
}

impl From<String> for StepKey {
    fn from(name: String) -> Self {
        StepKey::Name(name)
    }
}

impl From<StepId> for StepKey {
    fn from(id: StepId) -> Self {
        StepKey::Id(id)
    }
}

impl From<usize> for StepKey {
    fn from(position: usize) -> Self {
        StepKey::Position(position)
    }
}

impl From<&TourStep> for StepKey {
    fn from(step: &TourStep) -> Self {
        StepKey::Id(step.id())
    }
}

/// A guided multi-step flow, optionally owned by another entity.
#[derive(Clone)]
pub struct Tour {
    record: TourRecord,
    steps: StepSequence,
    /// Name of the current step as resolved from storage.
    current: Option<String>,
    factory: TourFactory,
}

impl Tour {
    pub(crate) fn new(record: TourRecord, factory: TourFactory) -> Self {
        Self {
            record,
            steps: StepSequence::new(),
            current: None,
            factory,
        }
    }

    /// Rebuild a tour from its stored record and stored steps.
    pub(crate) fn rehydrate(record: TourRecord, factory: TourFactory) -> Result<Self> {
        let steps = factory
            .store
            .load_steps(record.id)?
            .iter()
            .map(TourStep::from_record)
            .collect();
        let mut tour = Self {
            record,
            steps,
            current: None,
            factory,
        };
        tour.reload_current()?;
        debug!(tour_id = %tour.id(), tour = tour.name(), steps = tour.steps.len(), "rehydrated tour");
        Ok(tour)
    }

    /// Store-assigned id.
    pub fn id(&self) -> TourId {
        self.record.id
    }

    /// Tour name, not necessarily unique.
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// The owning entity, or `None` for unowned tours.
    pub fn owner(&self) -> Option<&OwnerRef> {
        self.record.owner.as_ref()
    }

    /// Stored status; never [`TourStatus::Restarted`].
    pub fn status(&self) -> TourStatus {
        self.record.status
    }

    /// Whether the stored status is [`TourStatus::Completed`].
    pub fn completed(&self) -> bool {
        self.record.status == TourStatus::Completed
    }

    /// Set only by [`Tour::finish`].
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.record.completed_at
    }

    /// The record as last read from the store.
    pub fn record(&self) -> &TourRecord {
        &self.record
    }

    /// All steps in compile order.
    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    /// Look a step up by name, id or position.
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use waypost::{InMemoryTourStore, NoopNotifier, TourFactory};
    /// # let factory = TourFactory::new(Arc::new(InMemoryTourStore::new()), Arc::new(NoopNotifier));
    /// let mut tour = factory.make_unowned("t").unwrap();
    /// tour.add_steps(["a", "b"]).unwrap();
    ///
    /// let b = tour.step("b").unwrap().clone();
    /// assert_eq!(tour.step(1usize), Some(&b));
    /// assert_eq!(tour.step(b.id()), Some(&b));
    /// ```
    pub fn step(&self, key: impl Into<StepKey>) -> Option<&TourStep> {
        match key.into() {
            StepKey::Name(name) => self.steps.get(&name),
            StepKey::Id(id) => self.steps.get_by_id(id),
            StepKey::Position(index) => self.steps.get_index(index),
        }
    }

    /// The step the current-step pointer refers to, if any.
    pub fn current(&self) -> Option<&TourStep> {
        self.current.as_deref().and_then(|name| self.steps.get(name))
    }

    /// Free-form JSON payload stored with the tour.
    pub fn context(&self) -> Option<&JsonValue> {
        self.record.context.as_ref()
    }

    /// Replace the context payload. A JSON `null` clears it.
    pub fn set_context(&mut self, context: JsonValue) -> Result<&mut Self> {
        self.save_with(|record| record.context = (!context.is_null()).then_some(context))?;
        Ok(self)
    }

    /// Remove the context payload.
    pub fn clear_context(&mut self) -> Result<&mut Self> {
        self.set_context(JsonValue::Null)
    }

    /// Compile one step into the tour and return it.
    pub fn create_step(&mut self, step: impl Into<StepDefinition>) -> Result<TourStep> {
        let name = self.factory.registry.resolve_step(self.name(), &step.into())?;
        self.insert_step(&name)
    }

    /// Compile several steps into the tour, in order, and return them.
    ///
    /// Every definition is resolved before the first step is stored.
    pub fn create_steps<I, D>(&mut self, steps: I) -> Result<Vec<TourStep>>
    where
        I: IntoIterator<Item = D>,
        D: Into<StepDefinition>,
    {
        let names = steps
            .into_iter()
            .map(|step| self.factory.registry.resolve_step(self.name(), &step.into()))
            .collect::<Result<Vec<_>>>()?;
        names.iter().map(|name| self.insert_step(name)).collect()
    }

    /// Like [`Tour::create_step`], returning the tour for chaining.
    pub fn add_step(&mut self, step: impl Into<StepDefinition>) -> Result<&mut Self> {
        self.create_step(step)?;
        Ok(self)
    }

    /// Like [`Tour::create_steps`], returning the tour for chaining.
    pub fn add_steps<I, D>(&mut self, steps: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<StepDefinition>,
    {
        self.create_steps(steps)?;
        Ok(self)
    }

    /// Start at the first step. Does nothing if already started.
    pub fn start(&mut self) -> Result<&mut Self> {
        self.start_from(None, false)
    }

    /// Start at `step`, or at the first step when `None`.
    ///
    /// An already started tour is left alone unless `force` is set. A `step`
    /// that is not part of the tour is rejected before anything changes.
    pub fn start_from(&mut self, step: Option<StepKey>, force: bool) -> Result<&mut Self> {
        if self.status() == TourStatus::Started && !force {
            debug!(tour_id = %self.id(), tour = self.name(), "tour already started");
            return Ok(self);
        }

        let target = match step {
            None => self.steps.first().map(TourStep::id),
            Some(key) => {
                let found = self.step(key.clone()).map(TourStep::id);
                Some(found.ok_or_else(|| {
                    TourError::InvalidArgument(format!(
                        "cannot start tour '{}': no step matches {key:?}",
                        self.name()
                    ))
                })?)
            }
        };

        self.transition(TourStatus::Started)?;
        self.go_to_step(target)?;
        Ok(self)
    }

    /// Start over at the first step, whatever the current status.
    pub fn restart(&mut self) -> Result<&mut Self> {
        let first = self.steps.first().map(TourStep::id);
        self.transition(TourStatus::Restarted)?;
        self.go_to_step(first)?;
        Ok(self)
    }

    /// Cancel the tour and clear the current step.
    pub fn cancel(&mut self) -> Result<&mut Self> {
        self.transition(TourStatus::Cancelled)?;
        self.go_to_step(None)?;
        Ok(self)
    }

    /// Mark the tour completed at `completed_at`, or now when `None`.
    pub fn finish(&mut self, completed_at: Option<DateTime<Utc>>) -> Result<&mut Self> {
        self.transition(TourStatus::Completed)?;
        self.go_to_step(None)?;
        let completed_at = completed_at.unwrap_or_else(Utc::now);
        self.save_with(|record| record.completed_at = Some(completed_at))?;
        self.refresh()?;
        Ok(self)
    }

    /// Mark the tour failed and clear the current step.
    pub fn fail(&mut self) -> Result<&mut Self> {
        self.transition(TourStatus::Failed)?;
        self.go_to_step(None)?;
        Ok(self)
    }

    /// Move to the next step. Leaving the last step completes the tour
    /// without setting a completion time.
    pub fn next(&mut self) -> Result<&mut Self> {
        let following = self.effective_current("next")?.next(self).map(TourStep::id);

        match following {
            Some(id) => self.go_to_step(Some(id))?,
            None => {
                self.go_to_step(None)?;
                self.transition(TourStatus::Completed)?;
            }
        }
        Ok(self)
    }

    /// Move to the previous step. Does nothing on the first step.
    pub fn previous(&mut self) -> Result<&mut Self> {
        let preceding = self
            .effective_current("previous")?
            .previous(self)
            .map(TourStep::id);

        if let Some(id) = preceding {
            self.go_to_step(Some(id))?;
        }
        Ok(self)
    }

    /// The step navigation starts from: the current step, else the first.
    fn effective_current(&self, direction: &str) -> Result<&TourStep> {
        if !Guard::navigable().check(&self.status()) {
            return Err(TourError::InvalidState(format!(
                "cannot go to {direction} step in tour '{}': status must be either created or started, got '{}'",
                self.name(),
                self.status()
            )));
        }

        self.current().or_else(|| self.steps.first()).ok_or_else(|| {
            TourError::InvalidState(format!(
                "cannot go to {direction} step in tour '{}': no steps in tour",
                self.name()
            ))
        })
    }

    /// Store a new step under this tour and compile it into the sequence.
    pub(crate) fn insert_step(&mut self, name: &str) -> Result<TourStep> {
        let record = self.factory.store.create_step(self.id(), name)?;
        let step = TourStep::from_record(&record);
        if let Some(replaced) = self.steps.insert(step.clone()) {
            debug!(tour_id = %self.id(), step = name, replaced = %replaced.id(), "step name reused");
        }
        debug!(tour_id = %self.id(), step = name, step_id = %step.id(), "compiled step");

        self.notify(TourChange::StepCreated { step: step.clone() })?;
        Ok(step)
    }

    fn transition(&mut self, target: TourStatus) -> Result<()> {
        let before = self.status();
        self.save_with(|record| record.status = target.persisted())?;
        info!(tour_id = %self.id(), tour = self.name(), from = %before, to = %target, "tour status updated");

        self.notify(TourChange::StatusChanged {
            before,
            after: target,
        })
    }

    fn go_to_step(&mut self, step: Option<StepId>) -> Result<()> {
        let before = self.current().cloned();
        self.save_with(|record| record.current_step = step)?;
        self.refresh()?;
        let after = self.current().cloned();

        self.notify(TourChange::StepChanged { before, after })
    }

    /// Persist an updated copy of the record; the in-memory record only
    /// changes once the store accepted it.
    fn save_with(&mut self, update: impl FnOnce(&mut TourRecord)) -> Result<()> {
        let mut record = self.record.clone();
        update(&mut record);
        self.factory.store.save_tour(&record)?;
        self.record = record;
        Ok(())
    }

    pub(crate) fn refresh(&mut self) -> Result<()> {
        self.record = self.factory.store.refresh_tour(self.id())?;
        self.reload_current()
    }

    fn reload_current(&mut self) -> Result<()> {
        self.current = match self.record.current_step {
            Some(id) => self
                .factory
                .store
                .find_step(self.id(), &StepLookup::Id(id))?
                .map(|record| record.name),
            None => None,
        };
        Ok(())
    }

    pub(crate) fn notify(&self, change: TourChange) -> Result<()> {
        let notifier = Arc::clone(&self.factory.notifier);
        notifier.notify(self, &change)
    }
}

impl fmt::Debug for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("record", &self.record)
            .field("steps", &self.steps)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
