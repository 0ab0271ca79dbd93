//! Fan-out of raw changes into named lifecycle events.
//!
//! This mapping sits outside the tour core: a tour only ever emits
//! [`TourChange`]s. Wrap an [`EventSubscriber`] in a [`FanOutNotifier`] to
//! receive `TourStarted`-style events instead.

use super::{EventNotifier, TourChange};
use crate::core::TourStatus;
use crate::error::Result;
use crate::tour::{Tour, TourStep};
use serde::{Deserialize, Serialize};

/// Named lifecycle event derived from a [`TourChange`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TourEvent {
    TourCreated,
    TourStarted { restarted: bool },
    TourCompleted,
    TourCancelled,
    TourFailed,
    StepCreated { step: TourStep },
    StepFinished { step: TourStep },
    StepStarted { step: TourStep },
}

impl TourEvent {
    /// Translate one change into zero or more named events.
    ///
    /// A status change maps on its requested target. A step change yields
    /// `StepFinished` for the step left and `StepStarted` for the step
    /// entered, in that order.
    pub fn from_change(change: &TourChange) -> Vec<TourEvent> {
        match change {
            TourChange::StatusChanged { after, .. } => vec![match after {
                TourStatus::Created => TourEvent::TourCreated,
                TourStatus::Started => TourEvent::TourStarted { restarted: false },
                TourStatus::Restarted => TourEvent::TourStarted { restarted: true },
                TourStatus::Completed => TourEvent::TourCompleted,
                TourStatus::Cancelled => TourEvent::TourCancelled,
                TourStatus::Failed => TourEvent::TourFailed,
            }],
            TourChange::StepChanged { before, after } => before
                .iter()
                .map(|step| TourEvent::StepFinished { step: step.clone() })
                .chain(
                    after
                        .iter()
                        .map(|step| TourEvent::StepStarted { step: step.clone() }),
                )
                .collect(),
            TourChange::StepCreated { step } => vec![TourEvent::StepCreated { step: step.clone() }],
        }
    }
}

/// Consumer of named lifecycle events.
pub trait EventSubscriber: Send + Sync {
    fn on_event(&self, tour: &Tour, event: &TourEvent) -> Result<()>;
}

/// Notifier that translates changes and hands the resulting events to a
/// subscriber.
pub struct FanOutNotifier<S: EventSubscriber> {
    subscriber: S,
}

impl<S: EventSubscriber> FanOutNotifier<S> {
    pub fn new(subscriber: S) -> Self {
        Self { subscriber }
    }

    pub fn subscriber(&self) -> &S {
        &self.subscriber
    }
}

impl<S: EventSubscriber> EventNotifier for FanOutNotifier<S> {
    fn notify(&self, tour: &Tour, change: &TourChange) -> Result<()> {
        TourEvent::from_change(change)
            .iter()
            .try_for_each(|event| self.subscriber.on_event(tour, event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StepId, TourId};

    fn step(id: i64, name: &str) -> TourStep {
        TourStep::from_parts(StepId(id), name, TourId(1))
    }

    #[test]
    fn restart_maps_to_restarted_start() {
        let change = TourChange::StatusChanged {
            before: TourStatus::Started,
            after: TourStatus::Restarted,
        };
        assert_eq!(
            TourEvent::from_change(&change),
            vec![TourEvent::TourStarted { restarted: true }]
        );
    }

    #[test]
    fn every_status_maps_to_one_event() {
        for after in TourStatus::ALL {
            let change = TourChange::StatusChanged {
                before: TourStatus::Created,
                after,
            };
            assert_eq!(TourEvent::from_change(&change).len(), 1, "{after}");
        }
    }

    #[test]
    fn step_change_finishes_then_starts() {
        let change = TourChange::StepChanged {
            before: Some(step(1, "a")),
            after: Some(step(2, "b")),
        };
        assert_eq!(
            TourEvent::from_change(&change),
            vec![
                TourEvent::StepFinished { step: step(1, "a") },
                TourEvent::StepStarted { step: step(2, "b") },
            ]
        );
    }

    #[test]
    fn clearing_the_pointer_only_finishes() {
        let change = TourChange::StepChanged {
            before: Some(step(1, "a")),
            after: None,
        };
        assert_eq!(
            TourEvent::from_change(&change),
            vec![TourEvent::StepFinished { step: step(1, "a") }]
        );

        let nothing = TourChange::StepChanged {
            before: None,
            after: None,
        };
        assert!(TourEvent::from_change(&nothing).is_empty());
    }
}
