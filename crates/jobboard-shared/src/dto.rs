//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobboard_core::domain::{ApplicationStatus, JobStatus, Role};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

const fn default_page() -> u64 {
    DEFAULT_PAGE
}

const fn default_size() -> u64 {
    DEFAULT_SIZE
}

/// Bounds check shared by every paginated endpoint: page >= 1 and
/// size in [1, 100].
pub fn validate_page_bounds(page: u64, size: u64) -> Vec<String> {
    let mut errors = Vec::new();
    if page < 1 {
        errors.push("Page must be at least 1.".to_string());
    }
    if size < 1 || size > MAX_PAGE_SIZE {
        errors.push(format!("Size must be between 1 and {MAX_PAGE_SIZE}."));
    }
    errors
}

// ---- Auth ----

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Payload returned from signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupObject {
    pub user_id: Uuid,
}

/// Query string of the email-verification endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload returned from a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginObject {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ---- Jobs ----

/// Request to create a job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreateRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

/// Partial update of a job posting; only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

/// Payload returned from job create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobObject {
    pub job_id: Uuid,
}

/// A job as shown in the public listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// Full projection of a single job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
}

/// A company's own job with its live application count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyJobItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub applications_count: u64,
}

/// Query string of the public job listing.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseJobsQuery {
    pub title: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

/// Query string of the "my jobs" listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MyJobsQuery {
    pub status: Option<JobStatus>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

// ---- Applications ----

/// Request to apply for a job. The resume travels as base64 bytes plus its
/// declared content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub resume: String,
    pub content_type: String,
    pub cover_letter: Option<String>,
}

/// The created application, echoed back to the applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationObject {
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// An application as shown to the job's owning company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListItem {
    pub id: Uuid,
    pub applicant_name: String,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Query string of the applications listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationsQuery {
    pub status: Option<ApplicationStatus>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

/// Request to move an application to a new review status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationStatusRequest {
    pub status: ApplicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds_accept_valid_range() {
        assert!(validate_page_bounds(1, 1).is_empty());
        assert!(validate_page_bounds(1, 10).is_empty());
        assert!(validate_page_bounds(7, 100).is_empty());
    }

    #[test]
    fn test_page_bounds_reject_out_of_range() {
        assert!(!validate_page_bounds(0, 10).is_empty());
        assert!(!validate_page_bounds(1, 0).is_empty());
        assert!(!validate_page_bounds(1, 101).is_empty());
    }

    #[test]
    fn test_browse_query_defaults() {
        let query: BrowseJobsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);
        assert!(query.title.is_none());
    }

    #[test]
    fn test_role_and_status_wire_format() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"name":"Jane Doe","email":"jane@x.com","password":"Abcdef1!","role":"applicant"}"#,
        )
        .unwrap();
        assert_eq!(request.role, Role::Applicant);

        let update: JobUpdateRequest = serde_json::from_str(r#"{"status":"Open"}"#).unwrap();
        assert_eq!(update.status, Some(JobStatus::Open));
    }
}
