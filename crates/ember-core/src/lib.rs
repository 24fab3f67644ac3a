//! Ember Core - Foundational types for the Ember engine
//!
//! This crate provides the types that all other Ember crates depend on:
//! - `Color`, `Alignment` - Common value types
//! - Error types and Result alias

mod error;
mod types;

pub use error::{EmberError, Result};
pub use types::{Alignment, Color};
