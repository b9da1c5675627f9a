#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use actix_web::{body, http::StatusCode, web};
    use async_trait::async_trait;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use uuid::Uuid;

    use jobboard_core::domain::{Application, ApplicationStatus, Job, JobStatus, Role, User};
    use jobboard_core::error::RepoError;
    use jobboard_core::ports::{
        ApplicationRepository, ApplicationWithApplicant, AuthError, BaseRepository, FileStore,
        JobFilters, JobRepository, JobWithApplications, Notification, NotificationQueue,
        NotifyError, PasswordService, RepoPage, ResumeType, StoreError, TokenService,
        UserRepository,
    };
    use jobboard_infra::{JwtConfig, JwtTokenService};
    use jobboard_shared::Envelope;
    use jobboard_shared::dto::{ApplyRequest, JobCreateRequest, LoginRequest, VerifyEmailQuery};

    use crate::handlers::{applications, auth, jobs};
    use crate::middleware::auth::Identity;
    use crate::middleware::error::AppError;
    use crate::state::AppState;

    #[derive(Default)]
    struct FakeUsers {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl BaseRepository<User, Uuid> for FakeUsers {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn insert(&self, entity: User) -> Result<User, RepoError> {
            self.users.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.users.lock().unwrap().retain(|u| u.id != id);
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for FakeUsers {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn mark_verified(&self, id: Uuid) -> Result<(), RepoError> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    user.verified = true;
                    Ok(())
                }
                None => Err(RepoError::NotFound),
            }
        }
    }

    #[derive(Default)]
    struct FakeJobs {
        jobs: Mutex<Vec<Job>>,
    }

    #[async_trait]
    impl BaseRepository<Job, Uuid> for FakeJobs {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, RepoError> {
            Ok(self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned())
        }

        async fn insert(&self, entity: Job) -> Result<Job, RepoError> {
            self.jobs.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.jobs.lock().unwrap().retain(|j| j.id != id);
            Ok(())
        }
    }

    #[async_trait]
    impl JobRepository for FakeJobs {
        async fn update_guarded(
            &self,
            _job: &Job,
            _expected_status: JobStatus,
        ) -> Result<bool, RepoError> {
            Ok(true)
        }

        async fn browse(
            &self,
            _filters: &JobFilters,
            _page: u64,
            _size: u64,
        ) -> Result<RepoPage<Job>, RepoError> {
            Ok(RepoPage {
                items: Vec::new(),
                total: 0,
            })
        }

        async fn list_by_creator(
            &self,
            _creator: Uuid,
            _status: Option<JobStatus>,
            _page: u64,
            _size: u64,
        ) -> Result<RepoPage<JobWithApplications>, RepoError> {
            Ok(RepoPage {
                items: Vec::new(),
                total: 0,
            })
        }
    }

    /// Application repository whose insert always loses the uniqueness race
    /// when `reject_as_duplicate` is set.
    struct FakeApplications {
        reject_as_duplicate: bool,
    }

    #[async_trait]
    impl BaseRepository<Application, Uuid> for FakeApplications {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Application>, RepoError> {
            Ok(None)
        }

        async fn insert(&self, entity: Application) -> Result<Application, RepoError> {
            if self.reject_as_duplicate {
                return Err(RepoError::UniqueViolation(
                    "applications_applicant_id_job_id_key".to_string(),
                ));
            }
            Ok(entity)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl ApplicationRepository for FakeApplications {
        async fn find_by_applicant_and_job(
            &self,
            _applicant_id: Uuid,
            _job_id: Uuid,
        ) -> Result<Option<Application>, RepoError> {
            Ok(None)
        }

        async fn count_by_job(&self, _job_id: Uuid) -> Result<u64, RepoError> {
            Ok(0)
        }

        async fn list_by_job(
            &self,
            _job_id: Uuid,
            _status: Option<ApplicationStatus>,
            _page: u64,
            _size: u64,
        ) -> Result<RepoPage<ApplicationWithApplicant>, RepoError> {
            Ok(RepoPage {
                items: Vec::new(),
                total: 0,
            })
        }

        async fn set_status(
            &self,
            _id: Uuid,
            _status: ApplicationStatus,
        ) -> Result<(), RepoError> {
            Ok(())
        }
    }

    struct FakePasswords;

    impl PasswordService for FakePasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    #[derive(Default)]
    struct FakeFiles {
        stored: Mutex<Vec<String>>,
        removed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FileStore for FakeFiles {
        async fn store(
            &self,
            _bytes: Vec<u8>,
            resume_type: ResumeType,
        ) -> Result<String, StoreError> {
            let url = format!(
                "http://localhost:8000/uploads/{}.{}",
                Uuid::new_v4(),
                resume_type.extension()
            );
            self.stored.lock().unwrap().push(url.clone());
            Ok(url)
        }

        async fn remove(&self, url: &str) -> Result<(), StoreError> {
            self.removed.lock().unwrap().push(url.to_owned());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CapturingQueue {
        submitted: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl NotificationQueue for CapturingQueue {
        async fn submit(&self, notification: Notification) -> Result<(), NotifyError> {
            self.submitted.lock().unwrap().push(notification);
            Ok(())
        }
    }

    struct Harness {
        state: web::Data<AppState>,
        tokens: web::Data<Arc<dyn TokenService>>,
        users: Arc<FakeUsers>,
        jobs: Arc<FakeJobs>,
        files: Arc<FakeFiles>,
        queue: Arc<CapturingQueue>,
        service: Arc<JwtTokenService>,
    }

    fn harness(jwt: JwtConfig, reject_duplicate_application: bool) -> Harness {
        let users = Arc::new(FakeUsers::default());
        let jobs = Arc::new(FakeJobs::default());
        let files = Arc::new(FakeFiles::default());
        let queue = Arc::new(CapturingQueue::default());
        let service = Arc::new(JwtTokenService::new(jwt));
        let tokens: Arc<dyn TokenService> = service.clone();

        let state = AppState {
            users: users.clone(),
            jobs: jobs.clone(),
            applications: Arc::new(FakeApplications {
                reject_as_duplicate: reject_duplicate_application,
            }),
            passwords: Arc::new(FakePasswords),
            files: files.clone(),
            notifications: queue.clone(),
            base_url: "http://localhost:8000".to_string(),
        };

        Harness {
            state: web::Data::new(state),
            tokens: web::Data::new(tokens),
            users,
            jobs,
            files,
            queue,
            service,
        }
    }

    fn test_jwt() -> JwtConfig {
        JwtConfig {
            secret: "handler-test-secret".to_string(),
            access_ttl_minutes: 60,
            verification_ttl_minutes: 60,
        }
    }

    fn applicant(email: &str) -> User {
        User::new(
            "Jane Doe".to_string(),
            email.to_string(),
            "hashed:Abcdef1!".to_string(),
            Role::Applicant,
        )
    }

    #[actix_web::test]
    async fn test_login_requires_verified_email() {
        let h = harness(test_jwt(), false);
        let user = applicant("jane@x.com");
        let user_id = user.id;
        h.users.users.lock().unwrap().push(user);

        let request = LoginRequest {
            email: "jane@x.com".to_string(),
            password: "Abcdef1!".to_string(),
        };

        // Correct credentials, unverified account.
        let err = auth::login(h.state.clone(), h.tokens.clone(), web::Json(request.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailNotVerified));

        h.users.mark_verified(user_id).await.unwrap();
        let resp = auth::login(h.state.clone(), h.tokens.clone(), web::Json(request))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_duplicate_application_conflicts_and_drops_resume() {
        let h = harness(test_jwt(), true);
        let user = applicant("jane@x.com");
        let identity = Identity {
            user_id: user.id,
            role: Role::Applicant,
        };
        let job = Job::new(
            Uuid::new_v4(),
            "Backend Engineer".to_string(),
            "Operate and extend the hiring backend.".to_string(),
            None,
            JobStatus::Open,
        );
        let job_id = job.id;
        h.users.users.lock().unwrap().push(user);
        h.jobs.jobs.lock().unwrap().push(job);

        let request = ApplyRequest {
            resume: BASE64.encode(b"%PDF-1.7 stub"),
            content_type: "application/pdf".to_string(),
            cover_letter: None,
        };
        let err = applications::apply(
            h.state.clone(),
            identity,
            web::Path::from(job_id),
            web::Json(request),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // The orphaned resume written before the losing insert is cleaned up.
        let stored = h.files.stored.lock().unwrap().clone();
        let removed = h.files.removed.lock().unwrap().clone();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored, removed);
    }

    #[actix_web::test]
    async fn test_expired_verification_link_is_reissued() {
        let jwt = JwtConfig {
            secret: "handler-test-secret".to_string(),
            access_ttl_minutes: 60,
            verification_ttl_minutes: -5,
        };
        let h = harness(jwt, false);
        let user = applicant("jane@x.com");
        let user_id = user.id;
        h.users.users.lock().unwrap().push(user);

        let token = h.service.issue_verification(user_id).unwrap();
        let resp = auth::verify_email(
            h.state.clone(),
            h.tokens.clone(),
            web::Query(VerifyEmailQuery { token }),
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = body::to_bytes(resp.into_body()).await.unwrap();
        let envelope: Envelope<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
        assert!(!envelope.success);

        let queued = h.queue.submitted.lock().unwrap();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].subject, "Verify your email");
        assert!(queued[0].body.contains("/api/verify-email?token="));

        let users = h.users.users.lock().unwrap();
        assert!(!users[0].verified);
    }

    #[actix_web::test]
    async fn test_job_creation_gates_on_token_role() {
        let h = harness(test_jwt(), false);
        let identity = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Applicant,
        };

        let request = JobCreateRequest {
            title: "Backend Engineer".to_string(),
            description: "Operate and extend the hiring backend.".to_string(),
            location: None,
            status: None,
        };
        let err = jobs::create_job(h.state.clone(), identity, web::Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // The gate fires on the token's role claim, before any store access.
        assert!(h.jobs.jobs.lock().unwrap().is_empty());
    }
}
