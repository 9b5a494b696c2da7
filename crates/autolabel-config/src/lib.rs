//! # Autolabel Config
//!
//! Configuration management for the autolabel engine: DOM attribute names,
//! the interactive-element selector, visibility thresholds and overlay
//! presentation.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
