//! Database connection management and SeaORM repositories.

mod connections;
mod postgres_base;

pub mod entity;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use postgres_repo::{
    PostgresApplicationRepository, PostgresJobRepository, PostgresUserRepository,
};
