//! Core State trait for lifecycle states.
//!
//! Lifecycle states implement this trait, which provides pure methods
//! for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states.
///
/// All methods are pure - no side effects. States are plain values that
/// describe where an entity currently is in its lifecycle.
///
/// # Required Traits
///
/// - `Clone`: states are copied into notifications
/// - `PartialEq`: states must be comparable for guard logic
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are persisted by stores
///
/// # Example
///
/// ```rust
/// use waypost::core::{State, TourStatus};
///
/// assert_eq!(TourStatus::Started.name(), "started");
/// assert!(TourStatus::Failed.is_final());
/// assert!(TourStatus::Failed.is_error());
/// assert!(!TourStatus::Created.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
