//! Data models for the personnel records API.
//!
//! These models match the REST contract of the personnel backend field for field.

mod department;
mod error_body;
mod record;

pub use department::*;
pub use error_body::*;
pub use record::*;
