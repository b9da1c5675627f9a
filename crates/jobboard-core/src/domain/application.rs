use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application review status. Unlike job statuses these carry no ordering
/// constraint; the owning company may move an application to any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Reviewed,
    Interview,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Reviewed => "Reviewed",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Hired => "Hired",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application entity. At most one exists per (applicant_id, job_id); the
/// store's composite unique constraint is the authoritative guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub job_id: Uuid,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl Application {
    /// Create a new application in the Applied state.
    pub fn new(
        applicant_id: Uuid,
        job_id: Uuid,
        resume_url: String,
        cover_letter: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            applicant_id,
            job_id,
            resume_url,
            cover_letter,
            status: ApplicationStatus::Applied,
            applied_at: Utc::now(),
        }
    }
}
