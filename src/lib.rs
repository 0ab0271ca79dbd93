//! Waypost: lifecycle tracking for guided multi-step tours
//!
//! A tour is a named, ordered set of steps that a subject walks through,
//! optionally owned by another entity. Waypost tracks each tour's status
//! and current step, persists both through a pluggable store, and reports
//! every change to a pluggable notifier.
//!
//! # Core Concepts
//!
//! - **TourStatus**: The lifecycle state machine, via the `State` trait
//! - **Tour**: The aggregate: steps, status, current-step pointer, context
//! - **TourFactory**: Makes and finds tours against a store and notifier
//! - **TourStore**: The storage contract, with an in-memory implementation
//! - **Pruner**: Retention policy for completed tours
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use waypost::{InMemoryTourStore, OwnerRef, RecordingNotifier, TourFactory, TourStatus};
//!
//! let notifier = Arc::new(RecordingNotifier::new());
//! let factory = TourFactory::new(Arc::new(InMemoryTourStore::new()), notifier.clone());
//!
//! let user = OwnerRef::new("user", 7);
//! let mut tour = factory.make("onboarding", &user).unwrap();
//! tour.add_steps(["welcome", "profile", "done"]).unwrap();
//!
//! tour.start().unwrap().next().unwrap();
//! assert_eq!(tour.current().unwrap().name(), "profile");
//!
//! let found = factory.find_owned("onboarding", &user).unwrap().unwrap();
//! assert_eq!(found.status(), TourStatus::Started);
//! assert_eq!(found.current().unwrap().name(), "profile");
//! assert!(!notifier.changes().is_empty());
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod storage;
pub mod tour;

// Re-export commonly used types
pub use crate::core::{Guard, OwnerRef, State, StepId, TourId, TourStatus, Tourable};
pub use config::{PruneConfig, WaypostConfig};
pub use error::{Result, TourError};
pub use events::{EventNotifier, NoopNotifier, RecordingNotifier, TourChange, TracingNotifier};
pub use storage::{InMemoryTourStore, PruneMode, PruneReport, Pruner, TourStore};
pub use tour::{StepKey, Tour, TourFactory, TourLookup, TourStep};
