//! Core domain types
//!
//! These types represent the entities the poller and the client share: jobs
//! submitted to the processing service, the statuses it reports, and the
//! voices it offers.

pub mod job;
pub mod language;
pub mod voice;
