//! Domain models for the farm assessment intake wizard

mod crops;
mod draft;
mod equipment;
mod farm_profile;
mod management;
mod parameters;
mod pest;
mod results;

pub use crops::*;
pub use draft::*;
pub use equipment::*;
pub use farm_profile::*;
pub use management::*;
pub use parameters::*;
pub use pest::*;
pub use results::*;
