//! Dubline Poller
//!
//! Turns the service's asynchronous job protocol into a call that looks
//! synchronous to the caller: submit once, query the status on a fixed
//! interval until the job is terminal, then fetch the artifact once.
//!
//! Architecture:
//! - Backend: the three remote operations behind the [`JobBackend`] trait
//! - Poller: the bounded wait loop and its error taxonomy
//! - Configuration: intervals, deadlines and retry bounds
//!
//! The poller keeps no job store. Dropping an in-flight future abandons the
//! wait but does not stop the job on the server, which offers no cancel call.

pub mod backend;
pub mod config;
pub mod error;
pub mod poller;

pub use backend::{DubbingBackend, JobBackend};
pub use config::{ConfigError, PollerConfig};
pub use error::{BackendError, PollerError};
pub use poller::{JobPoller, TargetOutcome};
