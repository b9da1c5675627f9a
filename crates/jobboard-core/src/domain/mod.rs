//! Domain entities - the core business objects.

mod application;
mod job;
mod user;

pub use application::{Application, ApplicationStatus};
pub use job::{Job, JobStatus};
pub use user::{Role, User};
