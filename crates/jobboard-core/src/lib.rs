//! # Jobboard Core
//!
//! The domain layer of the jobboard backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::RepoError;
