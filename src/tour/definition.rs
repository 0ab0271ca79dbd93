//! Tour and step definitions, and the registry that resolves them.

use super::{Tour, TourStep};
use crate::builder::TourTemplateBuilder;
use crate::error::{Result, TourError};
use std::collections::HashMap;

/// Reusable description of a step.
///
/// A template without a name takes the registry key it is resolved under.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepTemplate {
    pub name: Option<String>,
}

impl StepTemplate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }
}

/// What a step is compiled from.
#[derive(Clone, Debug, PartialEq)]
pub enum StepDefinition {
    /// A step name, or the key of a registered [`StepTemplate`].
    Name(String),
    Template(StepTemplate),
    /// An existing step; a new step with the same name is created.
    Instance(TourStep),
}

impl From<&str> for StepDefinition {
    fn from(name: &str) -> Self {
        StepDefinition::Name(name.to_string())
    }
}

impl From<String> for StepDefinition {
    fn from(name: String) -> Self {
        StepDefinition::Name(name)
    }
}

impl From<StepTemplate> for StepDefinition {
    fn from(template: StepTemplate) -> Self {
        StepDefinition::Template(template)
    }
}

impl From<TourStep> for StepDefinition {
    fn from(step: TourStep) -> Self {
        StepDefinition::Instance(step)
    }
}

/// Reusable description of a tour: its name, whether it is owned, and the
/// steps compiled into every tour made from it.
///
/// Build one with [`TourTemplate::builder`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TourTemplate {
    pub name: Option<String>,
    pub ownable: bool,
    pub steps: Vec<StepDefinition>,
}

impl TourTemplate {
    pub fn builder() -> TourTemplateBuilder {
        TourTemplateBuilder::new()
    }
}

/// What a tour is made from.
#[derive(Debug)]
pub enum TourDefinition {
    /// A tour name, or the key of a registered [`TourTemplate`].
    Name(String),
    Template(TourTemplate),
    /// An existing tour; its name, ownership and step names are reused
    /// for a new tour.
    Instance(Tour),
}

impl From<&str> for TourDefinition {
    fn from(name: &str) -> Self {
        TourDefinition::Name(name.to_string())
    }
}

impl From<String> for TourDefinition {
    fn from(name: String) -> Self {
        TourDefinition::Name(name)
    }
}

impl From<TourTemplate> for TourDefinition {
    fn from(template: TourTemplate) -> Self {
        TourDefinition::Template(template)
    }
}

impl From<Tour> for TourDefinition {
    fn from(tour: Tour) -> Self {
        TourDefinition::Instance(tour)
    }
}

/// Outcome of resolving a [`TourDefinition`].
#[derive(Debug)]
pub(crate) struct ResolvedTour {
    pub name: String,
    pub ownable: bool,
    /// Plain names skip the ownability check when making owned tours.
    pub by_name: bool,
    pub steps: Vec<StepDefinition>,
}

/// Named tour and step templates, passed explicitly to a
/// [`TourFactory`](super::TourFactory).
///
/// # Example
///
/// ```rust
/// use waypost::tour::{StepTemplate, TourRegistry, TourTemplate};
///
/// let registry = TourRegistry::new()
///     .with_tour(
///         "onboarding",
///         TourTemplate::builder().owned().steps(["welcome", "profile"]).build().unwrap(),
///     )
///     .with_step("welcome", StepTemplate::named("Welcome aboard"));
///
/// assert!(registry.tour("onboarding").is_some());
/// assert!(registry.step("profile").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TourRegistry {
    tours: HashMap<String, TourTemplate>,
    steps: HashMap<String, StepTemplate>,
}

impl TourRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_tour(&mut self, key: impl Into<String>, template: TourTemplate) -> &mut Self {
        self.tours.insert(key.into(), template);
        self
    }

    pub fn register_step(&mut self, key: impl Into<String>, template: StepTemplate) -> &mut Self {
        self.steps.insert(key.into(), template);
        self
    }

    pub fn with_tour(mut self, key: impl Into<String>, template: TourTemplate) -> Self {
        self.register_tour(key, template);
        self
    }

    pub fn with_step(mut self, key: impl Into<String>, template: StepTemplate) -> Self {
        self.register_step(key, template);
        self
    }

    pub fn tour(&self, key: &str) -> Option<&TourTemplate> {
        self.tours.get(key)
    }

    pub fn step(&self, key: &str) -> Option<&StepTemplate> {
        self.steps.get(key)
    }

    pub(crate) fn resolve_tour(&self, definition: TourDefinition) -> Result<ResolvedTour> {
        let resolved = match definition {
            TourDefinition::Name(key) => {
                if key.is_empty() {
                    return Err(TourError::InvalidArgument(
                        "cannot make tour: tour name is empty".into(),
                    ));
                }
                match self.tours.get(&key) {
                    Some(template) => ResolvedTour {
                        name: template.name.clone().unwrap_or_else(|| key.clone()),
                        ownable: template.ownable,
                        by_name: true,
                        steps: template.steps.clone(),
                    },
                    None => ResolvedTour {
                        name: key,
                        ownable: false,
                        by_name: true,
                        steps: Vec::new(),
                    },
                }
            }
            TourDefinition::Template(template) => ResolvedTour {
                name: template.name.ok_or_else(|| {
                    TourError::InvalidArgument("cannot make tour: template has no name".into())
                })?,
                ownable: template.ownable,
                by_name: false,
                steps: template.steps,
            },
            TourDefinition::Instance(tour) => ResolvedTour {
                name: tour.name().to_string(),
                ownable: tour.owner().is_some(),
                by_name: false,
                steps: tour
                    .steps()
                    .names()
                    .map(|name| StepDefinition::Name(name.to_string()))
                    .collect(),
            },
        };

        if resolved.name.is_empty() {
            return Err(TourError::InvalidArgument(
                "cannot make tour: resolved tour name is empty".into(),
            ));
        }
        Ok(resolved)
    }

    /// Resolve a step definition to the name the step is created under.
    pub(crate) fn resolve_step(&self, tour_name: &str, definition: &StepDefinition) -> Result<String> {
        let name = match definition {
            StepDefinition::Name(key) if key.is_empty() => {
                return Err(TourError::InvalidArgument(format!(
                    "invalid step name for tour '{tour_name}': name is empty"
                )));
            }
            StepDefinition::Name(key) => self
                .steps
                .get(key)
                .and_then(|template| template.name.clone())
                .unwrap_or_else(|| key.clone()),
            StepDefinition::Template(template) => template.name.clone().ok_or_else(|| {
                TourError::InvalidArgument(format!(
                    "cannot make step for tour '{tour_name}': template has no name"
                ))
            })?,
            StepDefinition::Instance(step) => step.name().to_string(),
        };

        if name.is_empty() {
            return Err(TourError::InvalidArgument(format!(
                "cannot make step for tour '{tour_name}': resolved step name is empty"
            )));
        }
        Ok(name)
    }
}
