//! # Jobboard Infrastructure
//!
//! Concrete implementations of the ports defined in `jobboard-core`:
//! database repositories, token and password services, and the mail,
//! notification and file-storage collaborators.

pub mod auth;
pub mod database;
pub mod mail;
pub mod notify;
pub mod storage;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, connect};
pub use mail::LogMailer;
pub use notify::InMemoryNotificationQueue;
pub use storage::LocalFileStore;
