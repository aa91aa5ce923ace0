//! Dubline Core
//!
//! Core types and abstractions shared by the dubline crates.
//!
//! This crate contains:
//! - Domain types: Jobs, their statuses, voices and target languages
//! - DTOs: Wire representations of the processing service's requests and responses

pub mod domain;
pub mod dto;
pub mod error;

pub use error::CoreError;
