//! Builder for constructing tour templates.

use crate::builder::error::BuildError;
use crate::tour::{StepDefinition, TourTemplate};

/// Builder for [`TourTemplate`]s with a fluent API.
pub struct TourTemplateBuilder {
    name: Option<String>,
    ownable: bool,
    steps: Vec<StepDefinition>,
}

impl TourTemplateBuilder {
    /// Create a new builder for an unowned, unnamed template.
    pub fn new() -> Self {
        Self {
            name: None,
            ownable: false,
            steps: Vec::new(),
        }
    }

    /// Set the tour name (optional; registered templates fall back to
    /// their key).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Tours made from this template must have an owner.
    pub fn owned(mut self) -> Self {
        self.ownable = true;
        self
    }

    /// Append one step.
    pub fn step(mut self, step: impl Into<StepDefinition>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Append several steps in order.
    pub fn steps<I, D>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<StepDefinition>,
    {
        self.steps.extend(steps.into_iter().map(Into::into));
        self
    }

    /// Build the template.
    pub fn build(self) -> Result<TourTemplate, BuildError> {
        if self.name.as_deref() == Some("") {
            return Err(BuildError::EmptyName);
        }

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                StepDefinition::Name(name) if name.is_empty() => {
                    return Err(BuildError::EmptyStepName { index });
                }
                StepDefinition::Template(template) => match template.name.as_deref() {
                    None => return Err(BuildError::UnnamedStep { index }),
                    Some("") => return Err(BuildError::EmptyStepName { index }),
                    Some(_) => {}
                },
                _ => {}
            }
        }

        Ok(TourTemplate {
            name: self.name,
            ownable: self.ownable,
            steps: self.steps,
        })
    }
}

impl Default for TourTemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
