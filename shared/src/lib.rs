//! Shared types and domain logic for the Farm LCA intake client
//!
//! This crate contains the assessment draft model, validation schema,
//! derived-value calculators, and the backend submission transformer shared
//! between the native client and the WASM bindings.

pub mod calculators;
pub mod models;
pub mod submission;
pub mod types;
pub mod validation;

pub use calculators::*;
pub use models::*;
pub use submission::*;
pub use types::*;
pub use validation::*;
