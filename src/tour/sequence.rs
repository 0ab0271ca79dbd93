//! Ordered, name-keyed step sequence.

use super::TourStep;
use crate::core::StepId;
use indexmap::IndexMap;

/// The compiled steps of one tour, keyed by name in compile order.
///
/// Inserting a step whose name is already present replaces the stored
/// step but keeps the original position, so a duplicate name collapses
/// to the last step compiled under it.
///
/// # Example
///
/// ```rust
/// use waypost::tour::StepSequence;
///
/// let sequence = StepSequence::new();
/// assert!(sequence.is_empty());
/// assert!(sequence.first().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepSequence {
    steps: IndexMap<String, TourStep>,
}

impl StepSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a step under its name, returning the step it replaced.
    pub fn insert(&mut self, step: TourStep) -> Option<TourStep> {
        self.steps.insert(step.name().to_string(), step)
    }

    /// Step compiled under `name`.
    pub fn get(&self, name: &str) -> Option<&TourStep> {
        self.steps.get(name)
    }

    /// Step with the given id. Replaced duplicates are not found.
    pub fn get_by_id(&self, id: StepId) -> Option<&TourStep> {
        self.steps.values().find(|step| step.id() == id)
    }

    /// Step at a zero-based position.
    pub fn get_index(&self, index: usize) -> Option<&TourStep> {
        self.steps.get_index(index).map(|(_, step)| step)
    }

    /// Zero-based position of the step named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.steps.get_index_of(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// The step navigation starts at.
    pub fn first(&self) -> Option<&TourStep> {
        self.get_index(0)
    }

    pub fn last(&self) -> Option<&TourStep> {
        self.steps.last().map(|(_, step)| step)
    }

    /// The step following the first entry matching `predicate`.
    pub fn after<P>(&self, mut predicate: P) -> Option<&TourStep>
    where
        P: FnMut(&str, &TourStep) -> bool,
    {
        let index = self.steps.iter().position(|(key, step)| predicate(key, step))?;
        self.get_index(index + 1)
    }

    /// The step preceding the first entry matching `predicate`.
    pub fn before<P>(&self, mut predicate: P) -> Option<&TourStep>
    where
        P: FnMut(&str, &TourStep) -> bool,
    {
        let index = self.steps.iter().position(|(key, step)| predicate(key, step))?;
        index.checked_sub(1).and_then(|i| self.get_index(i))
    }

    /// Number of distinct step names.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in compile order.
    pub fn iter(&self) -> impl Iterator<Item = &TourStep> {
        self.steps.values()
    }

    /// Step names in compile order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }
}

impl FromIterator<TourStep> for StepSequence {
    fn from_iter<I: IntoIterator<Item = TourStep>>(iter: I) -> Self {
        let mut sequence = StepSequence::new();
        for step in iter {
            sequence.insert(step);
        }
        sequence
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a TourStep;
    type IntoIter = indexmap::map::Values<'a, String, TourStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.values()
    }
}
