//! Builder API for tour templates.
//!
//! # Example
//!
//! ```rust
//! use waypost::builder::TourTemplateBuilder;
//!
//! let template = TourTemplateBuilder::new()
//!     .name("onboarding")
//!     .owned()
//!     .steps(["welcome", "profile", "done"])
//!     .build()
//!     .unwrap();
//!
//! assert!(template.ownable);
//! assert_eq!(template.steps.len(), 3);
//! ```

pub mod error;
pub mod template;

pub use error::BuildError;
pub use template::TourTemplateBuilder;
