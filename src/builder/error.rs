//! Build errors for tour templates.

use crate::error::TourError;
use thiserror::Error;

/// Errors that can occur when building tour templates.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Tour name is empty. Pass a non-empty name to .name() or leave it unset")]
    EmptyName,

    #[error("Step {index} has an empty name")]
    EmptyStepName { index: usize },

    #[error("Step {index} is an unnamed template. Give it a name or register it under a key")]
    UnnamedStep { index: usize },
}

impl From<BuildError> for TourError {
    fn from(err: BuildError) -> Self {
        TourError::InvalidArgument(err.to_string())
    }
}
