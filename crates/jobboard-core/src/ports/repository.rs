use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Application, ApplicationStatus, Job, JobStatus, User};
use crate::error::RepoError;

/// One page of repository results plus the unpaged total.
#[derive(Debug)]
pub struct RepoPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Case-insensitive substring filters for the public job listing.
#[derive(Debug, Default, Clone)]
pub struct JobFilters {
    pub title: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
}

/// A job annotated with its live application count.
#[derive(Debug)]
pub struct JobWithApplications {
    pub job: Job,
    pub applications: u64,
}

/// An application with the applicant's name resolved.
#[derive(Debug)]
pub struct ApplicationWithApplicant {
    pub application: Application,
    pub applicant_name: String,
}

/// Generic repository trait defining the CRUD operations every entity needs.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique constraint violations surface as
    /// [`RepoError::UniqueViolation`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address (case-sensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Flip the verified flag to true.
    async fn mark_verified(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Job repository.
#[async_trait]
pub trait JobRepository: BaseRepository<Job, Uuid> {
    /// Persist an updated job, guarded by a compare-and-set on the status
    /// value the caller read. Returns false when no row matched, i.e. a
    /// concurrent update moved the status first.
    async fn update_guarded(&self, job: &Job, expected_status: JobStatus)
    -> Result<bool, RepoError>;

    /// Public listing with substring filters, newest first.
    async fn browse(
        &self,
        filters: &JobFilters,
        page: u64,
        size: u64,
    ) -> Result<RepoPage<Job>, RepoError>;

    /// A creator's own jobs with live application counts.
    async fn list_by_creator(
        &self,
        creator: Uuid,
        status: Option<JobStatus>,
        page: u64,
        size: u64,
    ) -> Result<RepoPage<JobWithApplications>, RepoError>;
}

/// Application repository.
#[async_trait]
pub trait ApplicationRepository: BaseRepository<Application, Uuid> {
    /// Duplicate-application lookup. The composite unique constraint on
    /// (applicant_id, job_id) remains the authoritative guard.
    async fn find_by_applicant_and_job(
        &self,
        applicant_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>, RepoError>;

    async fn count_by_job(&self, job_id: Uuid) -> Result<u64, RepoError>;

    /// Applications for a job with applicant names resolved, newest first.
    async fn list_by_job(
        &self,
        job_id: Uuid,
        status: Option<ApplicationStatus>,
        page: u64,
        size: u64,
    ) -> Result<RepoPage<ApplicationWithApplicant>, RepoError>;

    /// Move an application to a new review status.
    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> Result<(), RepoError>;
}
