//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod file_store;
mod mailer;
mod notify;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenKind, TokenOutcome, TokenService};
pub use file_store::{FileStore, ResumeType, StoreError};
pub use mailer::{MailError, Mailer};
pub use notify::{Notification, NotificationQueue, NotifyError};
pub use repository::{
    ApplicationRepository, ApplicationWithApplicant, BaseRepository, JobFilters, JobRepository,
    JobWithApplications, RepoPage, UserRepository,
};
