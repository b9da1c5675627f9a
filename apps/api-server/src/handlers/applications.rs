//! Application endpoints: apply, list and review.

use actix_web::{HttpResponse, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::instrument;
use uuid::Uuid;

use jobboard_core::domain::{Application, Role};
use jobboard_core::error::RepoError;
use jobboard_core::ports::{
    ApplicationRepository, BaseRepository, FileStore, Notification, NotificationQueue, ResumeType,
};
use jobboard_core::validation::validate_cover_letter;
use jobboard_shared::Envelope;
use jobboard_shared::PageObject;
use jobboard_shared::dto::{
    ApplicationListItem, ApplicationObject, ApplicationStatusRequest, ApplicationsQuery,
    ApplyRequest, validate_page_bounds,
};

use crate::handlers::resolve_caller;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn application_object(application: &Application) -> ApplicationObject {
    ApplicationObject {
        application_id: application.id,
        job_id: application.job_id,
        resume_url: application.resume_url.clone(),
        cover_letter: application.cover_letter.clone(),
        status: application.status,
        applied_at: application.applied_at,
    }
}

#[instrument(skip(state, identity, request))]
pub async fn apply(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    request: web::Json<ApplyRequest>,
) -> AppResult<HttpResponse> {
    if identity.role != Role::Applicant {
        return Err(AppError::Forbidden(
            "Only applicants can apply to jobs".to_string(),
        ));
    }
    let caller = resolve_caller(&state, &identity).await?;

    let job_id = path.into_inner();
    let job = state
        .jobs
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    // Pre-check for a friendlier message; the composite unique index still
    // decides under concurrency.
    if state
        .applications
        .find_by_applicant_and_job(caller.id, job.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    let request = request.into_inner();

    let resume_type = ResumeType::from_mime(&request.content_type)
        .ok_or_else(|| AppError::UnsupportedMediaType(request.content_type.clone()))?;

    if let Some(cover_letter) = &request.cover_letter {
        let errors = validate_cover_letter(cover_letter);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
    }

    let bytes = BASE64
        .decode(request.resume.as_bytes())
        .map_err(|_| AppError::BadRequest("Resume must be valid base64".to_string()))?;

    let resume_url = state
        .files
        .store(bytes, resume_type)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let application =
        Application::new(caller.id, job.id, resume_url.clone(), request.cover_letter);
    let application = match state.applications.insert(application).await {
        Ok(application) => application,
        Err(RepoError::UniqueViolation(_)) => {
            // Lost the race against a concurrent duplicate; the stored
            // resume now references nothing, so drop it.
            if let Err(e) = state.files.remove(&resume_url).await {
                tracing::warn!(url = %resume_url, error = %e, "Failed to remove orphaned resume");
            }
            return Err(AppError::Conflict(
                "You have already applied to this job".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(company) = state.users.find_by_id(job.created_by).await? {
        let notification = Notification::new(
            company.email,
            "New Job Application Received",
            format!("{} has applied for your job '{}'.", caller.name, job.title),
        );
        if let Err(e) = state.notifications.submit(notification).await {
            tracing::warn!(job_id = %job.id, error = %e, "Failed to queue application notice");
        }
    }

    tracing::info!(application_id = %application.id, job_id = %job.id, "Application submitted");

    Ok(HttpResponse::Created().json(Envelope::ok(
        "Application submitted successfully",
        application_object(&application),
    )))
}

#[instrument(skip(state, identity, query))]
pub async fn list_applications(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    query: web::Query<ApplicationsQuery>,
) -> AppResult<HttpResponse> {
    let caller = resolve_caller(&state, &identity).await?;

    let job = state
        .jobs
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if identity.role != Role::Company || job.created_by != caller.id {
        return Err(AppError::Forbidden(
            "Only the job's owning company can view its applications".to_string(),
        ));
    }

    let query = query.into_inner();
    let errors = validate_page_bounds(query.page, query.size);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let page = state
        .applications
        .list_by_job(job.id, query.status, query.page, query.size)
        .await?;

    let items: Vec<ApplicationListItem> = page
        .items
        .into_iter()
        .map(|row| ApplicationListItem {
            id: row.application.id,
            applicant_name: row.applicant_name,
            resume_url: row.application.resume_url,
            cover_letter: row.application.cover_letter,
            status: row.application.status,
            applied_at: row.application.applied_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(Envelope::ok(
        "Applications fetched successfully",
        PageObject::new(items, page.total, query.page, query.size),
    )))
}

#[instrument(skip(state, identity, request))]
pub async fn set_application_status(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<ApplicationStatusRequest>,
) -> AppResult<HttpResponse> {
    let caller = resolve_caller(&state, &identity).await?;
    let (job_id, application_id) = path.into_inner();

    let job = state
        .jobs
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if identity.role != Role::Company || job.created_by != caller.id {
        return Err(AppError::Forbidden(
            "Only the job's owning company can review its applications".to_string(),
        ));
    }

    let mut application = state
        .applications
        .find_by_id(application_id)
        .await?
        .filter(|a| a.job_id == job.id)
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    state
        .applications
        .set_status(application.id, request.status)
        .await?;
    application.status = request.status;

    tracing::info!(
        application_id = %application.id,
        status = %application.status,
        "Application status updated"
    );

    Ok(HttpResponse::Ok().json(Envelope::ok(
        "Application status updated successfully",
        application_object(&application),
    )))
}
