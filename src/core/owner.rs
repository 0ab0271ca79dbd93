//! Owner references and the owner capability.

use crate::error::{Result, TourError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Polymorphic reference to the entity owning a tour: a type tag plus id.
///
/// The referenced entity is not guaranteed to still exist.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    pub owner_type: String,
    pub id: i64,
}

impl OwnerRef {
    pub fn new(owner_type: impl Into<String>, id: i64) -> Self {
        Self {
            owner_type: owner_type.into(),
            id,
        }
    }

    /// Reject references that cannot identify an owner.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.owner_type.trim().is_empty() {
            return Err(TourError::InvalidArgument(format!(
                "owner reference with id {} has no type tag",
                self.id
            )));
        }
        Ok(())
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner_type, self.id)
    }
}

/// Capability implemented by values that can own tours.
///
/// # Example
///
/// ```rust
/// use waypost::core::{OwnerRef, Tourable};
///
/// struct User {
///     id: i64,
/// }
///
/// impl Tourable for User {
///     fn owner_ref(&self) -> OwnerRef {
///         OwnerRef::new("user", self.id)
///     }
/// }
///
/// assert_eq!(User { id: 7 }.owner_ref().to_string(), "user#7");
/// ```
pub trait Tourable {
    fn owner_ref(&self) -> OwnerRef;
}

impl Tourable for OwnerRef {
    fn owner_ref(&self) -> OwnerRef {
        self.clone()
    }
}

impl<T: Tourable + ?Sized> Tourable for &T {
    fn owner_ref(&self) -> OwnerRef {
        (**self).owner_ref()
    }
}
