//! Guard predicates for operation preconditions.
//!
//! Guards are pure boolean functions over a state. Each tour operation
//! carries its own guard instead of consulting a central transition table.

use super::state::State;
use super::status::TourStatus;
use std::marker::PhantomData;

/// Pure predicate that determines if an operation may run in a state.
///
/// # Example
///
/// ```rust
/// use waypost::core::{Guard, State, TourStatus};
///
/// let not_final = Guard::new(|s: &TourStatus| !s.is_final());
///
/// assert!(not_final.check(&TourStatus::Started));
/// assert!(!not_final.check(&TourStatus::Cancelled));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Check if the guard allows the operation in this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl Guard<TourStatus> {
    /// Guard for step navigation: only mutable statuses pass.
    pub fn navigable() -> Self {
        Guard::new(TourStatus::is_mutable)
    }
}
