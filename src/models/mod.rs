//! Typed model types for API resources.

mod configuration;
mod organization;

pub use configuration::*;
pub use organization::*;
