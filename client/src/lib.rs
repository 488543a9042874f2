//! Farm LCA intake client
//!
//! Native client for the African farm life-cycle assessment backend: the
//! six-step intake wizard, the typed API client, and report/chart
//! rendering. Domain models and validation live in the `shared` crate.

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod wizard;

pub use api::AssessmentApiClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use wizard::{AssessmentWizard, Step, WizardEvent};
