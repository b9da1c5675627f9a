//! Shared application state.

use std::sync::Arc;

use sea_orm::DbConn;

use jobboard_core::ports::{
    ApplicationRepository, FileStore, JobRepository, NotificationQueue, PasswordService,
    UserRepository,
};
use jobboard_infra::database::postgres_repo::{
    PostgresApplicationRepository, PostgresJobRepository, PostgresUserRepository,
};
use jobboard_infra::{Argon2PasswordService, InMemoryNotificationQueue, LocalFileStore, LogMailer};

use crate::config::AppConfig;

/// Everything handlers need, behind the ports so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub files: Arc<dyn FileStore>,
    pub notifications: Arc<dyn NotificationQueue>,
    /// Public base URL for verification links.
    pub base_url: String,
}

impl AppState {
    pub fn new(db: DbConn, config: &AppConfig) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            jobs: Arc::new(PostgresJobRepository::new(db.clone())),
            applications: Arc::new(PostgresApplicationRepository::new(db)),
            passwords: Arc::new(Argon2PasswordService::new()),
            files: Arc::new(LocalFileStore::new(
                &config.upload_dir,
                config.base_url.clone(),
            )),
            notifications: Arc::new(InMemoryNotificationQueue::start(Arc::new(LogMailer), 1024)),
            base_url: config.base_url.clone(),
        }
    }
}
