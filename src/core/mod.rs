//! Core lifecycle types.
//!
//! This module contains the pure part of the tour lifecycle:
//! - State definitions via the `State` trait and the `TourStatus` enum
//! - Guard predicates for per-operation preconditions
//! - Owner references and the `Tourable` capability
//! - Store-assigned identifiers
//!
//! Nothing in here touches storage or notifications.

mod guard;
mod ids;
mod owner;
mod state;
mod status;

pub use guard::Guard;
pub use ids::{StepId, TourId};
pub use owner::{OwnerRef, Tourable};
pub use state::State;
pub use status::TourStatus;
