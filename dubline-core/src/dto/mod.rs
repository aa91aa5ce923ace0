//! Data Transfer Objects for the processing service API
//!
//! These mirror the JSON bodies exchanged with the service. Domain code
//! converts them into the types in [`crate::domain`] as early as possible.

pub mod dubbing;
pub mod speech;
pub mod voice;
