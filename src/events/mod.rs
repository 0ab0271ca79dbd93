//! Change notifications emitted by tours.
//!
//! Every status transition, current-step move and step creation is
//! reported to an [`EventNotifier`] as a [`TourChange`]. The core is
//! agnostic to what consumes them. The [`subscriber`] module holds the
//! optional mapping onto named lifecycle events.

use crate::core::TourStatus;
use crate::error::Result;
use crate::tour::{Tour, TourStep};
use serde::{Deserialize, Serialize};

mod notifiers;
pub mod subscriber;

pub use notifiers::{CompositeNotifier, NoopNotifier, Notification, RecordingNotifier, TracingNotifier};
pub use subscriber::{EventSubscriber, FanOutNotifier, TourEvent};

/// A single change to a tour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TourChange {
    /// `after` is the requested status, so a restart reports `Restarted`
    /// even though `Started` is stored.
    StatusChanged {
        before: TourStatus,
        after: TourStatus,
    },
    /// The current-step pointer moved. `after` is the step resolved from
    /// storage once the move was persisted.
    StepChanged {
        before: Option<TourStep>,
        after: Option<TourStep>,
    },
    StepCreated { step: TourStep },
}

/// Receiver of tour changes.
///
/// Called synchronously from inside tour operations, possibly several
/// times per operation. An error aborts the calling operation; changes
/// already persisted are not rolled back.
pub trait EventNotifier: Send + Sync {
    fn notify(&self, tour: &Tour, change: &TourChange) -> Result<()>;
}
