//! # Jobboard Shared
//!
//! Types shared between the API server and its clients: the uniform
//! response envelope, pagination payloads and request/response DTOs.

pub mod dto;
pub mod response;

pub use response::{Envelope, PageObject};
