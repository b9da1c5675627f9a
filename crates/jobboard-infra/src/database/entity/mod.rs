//! SeaORM entities and their conversions to domain types.

pub mod application;
pub mod job;
pub mod user;
