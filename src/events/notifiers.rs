//! Stock [`EventNotifier`] implementations.

use super::{EventNotifier, TourChange};
use crate::core::TourId;
use crate::error::{Result, TourError};
use crate::tour::Tour;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl EventNotifier for NoopNotifier {
    fn notify(&self, _tour: &Tour, _change: &TourChange) -> Result<()> {
        Ok(())
    }
}

/// Logs every notification through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl EventNotifier for TracingNotifier {
    fn notify(&self, tour: &Tour, change: &TourChange) -> Result<()> {
        match change {
            TourChange::StatusChanged { before, after } => info!(
                tour_id = %tour.id(),
                tour = tour.name(),
                from = %before,
                to = %after,
                "tour status changed"
            ),
            TourChange::StepChanged { before, after } => info!(
                tour_id = %tour.id(),
                tour = tour.name(),
                from = before.as_ref().map(|s| s.name()),
                to = after.as_ref().map(|s| s.name()),
                "tour step changed"
            ),
            TourChange::StepCreated { step } => info!(
                tour_id = %tour.id(),
                tour = tour.name(),
                step = step.name(),
                "tour step created"
            ),
        }
        Ok(())
    }
}

/// A recorded notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub tour_id: TourId,
    pub tour_name: String,
    pub change: TourChange,
}

/// Keeps every notification in memory, in dispatch order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn changes(&self) -> Vec<TourChange> {
        self.notifications().into_iter().map(|n| n.change).collect()
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl EventNotifier for RecordingNotifier {
    fn notify(&self, tour: &Tour, change: &TourChange) -> Result<()> {
        self.seen
            .lock()
            .map_err(|e| TourError::Notification(format!("mutex poisoned: {e}")))?
            .push(Notification {
                tour_id: tour.id(),
                tour_name: tour.name().to_string(),
                change: change.clone(),
            });
        Ok(())
    }
}

/// Forwards each notification to several notifiers, stopping at the
/// first failure.
#[derive(Clone, Default)]
pub struct CompositeNotifier {
    notifiers: Vec<Arc<dyn EventNotifier>>,
}

impl CompositeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, notifier: Arc<dyn EventNotifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }
}

impl EventNotifier for CompositeNotifier {
    fn notify(&self, tour: &Tour, change: &TourChange) -> Result<()> {
        self.notifiers
            .iter()
            .try_for_each(|notifier| notifier.notify(tour, change))
    }
}
