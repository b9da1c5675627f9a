use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job posting status. Progression is strictly forward: a transition is
/// legal iff the new status does not sit before the old one in
/// Draft -> Open -> Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Draft,
    Open,
    Closed,
}

impl JobStatus {
    const fn order_index(self) -> u8 {
        match self {
            JobStatus::Draft => 0,
            JobStatus::Open => 1,
            JobStatus::Closed => 2,
        }
    }

    /// Forward-only check, decoupled from the string representation.
    pub const fn can_transition_to(self, next: JobStatus) -> bool {
        next.order_index() >= self.order_index()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            JobStatus::Draft => "Draft",
            JobStatus::Open => "Open",
            JobStatus::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job entity. Created by a company user; mutated only by its creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub status: JobStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job owned by `created_by`.
    pub fn new(
        created_by: Uuid,
        title: String,
        description: String,
        location: Option<String>,
        status: JobStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            location,
            status,
            created_by,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(JobStatus::Draft.can_transition_to(JobStatus::Open));
        assert!(JobStatus::Draft.can_transition_to(JobStatus::Closed));
        assert!(JobStatus::Open.can_transition_to(JobStatus::Closed));
    }

    #[test]
    fn test_same_status_allowed() {
        for status in [JobStatus::Draft, JobStatus::Open, JobStatus::Closed] {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!JobStatus::Open.can_transition_to(JobStatus::Draft));
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Open));
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Draft));
    }

    #[test]
    fn test_full_transition_matrix() {
        let all = [JobStatus::Draft, JobStatus::Open, JobStatus::Closed];
        for (old_idx, old) in all.iter().enumerate() {
            for (new_idx, new) in all.iter().enumerate() {
                assert_eq!(old.can_transition_to(*new), new_idx >= old_idx);
            }
        }
    }

    #[test]
    fn test_new_job_defaults() {
        let creator = Uuid::new_v4();
        let job = Job::new(
            creator,
            "Backend Engineer".to_string(),
            "Build and operate the hiring platform backend.".to_string(),
            None,
            JobStatus::Draft,
        );
        assert_eq!(job.created_by, creator);
        assert_eq!(job.status, JobStatus::Draft);
    }
}
