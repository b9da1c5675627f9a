//! Job posting endpoints.

use actix_web::{HttpResponse, web};
use tracing::instrument;
use uuid::Uuid;

use jobboard_core::domain::{Job, JobStatus, Role, User};
use jobboard_core::ports::{ApplicationRepository, BaseRepository, JobFilters, JobRepository};
use jobboard_core::validation::{validate_job_description, validate_job_title};
use jobboard_shared::Envelope;
use jobboard_shared::PageObject;
use jobboard_shared::dto::{
    BrowseJobsQuery, JobCreateRequest, JobDetail, JobListItem, JobObject, JobUpdateRequest,
    MyJobItem, MyJobsQuery, validate_page_bounds,
};

use crate::handlers::resolve_caller;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Role gate on the token's role claim, checked before any store access.
fn require_company(identity: &Identity, action: &str) -> Result<(), AppError> {
    if identity.role == Role::Company {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("Only companies can {action}")))
    }
}

async fn find_owned_job(state: &AppState, job_id: Uuid, caller: &User) -> Result<Job, AppError> {
    let job = state
        .jobs
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if job.created_by != caller.id {
        return Err(AppError::Forbidden(
            "You do not own this job".to_string(),
        ));
    }

    Ok(job)
}

#[instrument(skip(state, identity, request))]
pub async fn create_job(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<JobCreateRequest>,
) -> AppResult<HttpResponse> {
    require_company(&identity, "create jobs")?;
    let caller = resolve_caller(&state, &identity).await?;

    let request = request.into_inner();
    let mut errors = validate_job_title(&request.title);
    errors.extend(validate_job_description(&request.description));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let job = Job::new(
        caller.id,
        request.title,
        request.description,
        request.location,
        request.status.unwrap_or(JobStatus::Draft),
    );
    let job = state.jobs.insert(job).await?;

    tracing::info!(job_id = %job.id, status = %job.status, "Job created");

    Ok(HttpResponse::Created().json(Envelope::ok(
        "Job created successfully",
        JobObject { job_id: job.id },
    )))
}

#[instrument(skip(state, identity, request))]
pub async fn update_job(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    request: web::Json<JobUpdateRequest>,
) -> AppResult<HttpResponse> {
    let caller = resolve_caller(&state, &identity).await?;
    let mut job = find_owned_job(&state, path.into_inner(), &caller).await?;
    let request = request.into_inner();

    let mut errors = Vec::new();
    if let Some(title) = &request.title {
        errors.extend(validate_job_title(title));
    }
    if let Some(description) = &request.description {
        errors.extend(validate_job_description(description));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let previous_status = job.status;
    if let Some(next) = request.status {
        if !job.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition(format!(
                "{} -> {}",
                job.status, next
            )));
        }
        job.status = next;
    }
    if let Some(title) = request.title {
        job.title = title;
    }
    if let Some(description) = request.description {
        job.description = description;
    }
    if let Some(location) = request.location {
        job.location = Some(location);
    }

    // Guarded write on the status we read; a concurrent transition loses
    // nothing silently.
    if !state.jobs.update_guarded(&job, previous_status).await? {
        return Err(AppError::Conflict(
            "Job was modified concurrently; please retry".to_string(),
        ));
    }

    tracing::info!(job_id = %job.id, status = %job.status, "Job updated");

    Ok(HttpResponse::Ok().json(Envelope::ok(
        "Job updated successfully",
        JobObject { job_id: job.id },
    )))
}

#[instrument(skip(state, identity))]
pub async fn delete_job(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let caller = resolve_caller(&state, &identity).await?;
    let job = find_owned_job(&state, path.into_inner(), &caller).await?;

    let applications = state.applications.count_by_job(job.id).await?;
    if applications > 0 {
        return Err(AppError::Conflict(
            "Cannot delete a job that has applications".to_string(),
        ));
    }

    state.jobs.delete(job.id).await?;
    tracing::info!(job_id = %job.id, "Job deleted");

    Ok(HttpResponse::Ok().json(Envelope::ok_empty("Job deleted successfully")))
}

#[instrument(skip(state, identity, query))]
pub async fn browse_jobs(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<BrowseJobsQuery>,
) -> AppResult<HttpResponse> {
    resolve_caller(&state, &identity).await?;

    let query = query.into_inner();
    let errors = validate_page_bounds(query.page, query.size);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let filters = JobFilters {
        title: query.title,
        location: query.location,
        company_name: query.company_name,
    };
    let page = state.jobs.browse(&filters, query.page, query.size).await?;

    let items: Vec<JobListItem> = page
        .items
        .into_iter()
        .map(|job| JobListItem {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            status: job.status,
            created_at: job.created_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(Envelope::ok(
        "Jobs fetched successfully",
        PageObject::new(items, page.total, query.page, query.size),
    )))
}

#[instrument(skip(state, identity, query))]
pub async fn my_jobs(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<MyJobsQuery>,
) -> AppResult<HttpResponse> {
    require_company(&identity, "list their jobs")?;
    let caller = resolve_caller(&state, &identity).await?;

    let query = query.into_inner();
    let errors = validate_page_bounds(query.page, query.size);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let page = state
        .jobs
        .list_by_creator(caller.id, query.status, query.page, query.size)
        .await?;

    let items: Vec<MyJobItem> = page
        .items
        .into_iter()
        .map(|row| MyJobItem {
            id: row.job.id,
            title: row.job.title,
            description: row.job.description,
            location: row.job.location,
            status: row.job.status,
            created_at: row.job.created_at,
            applications_count: row.applications,
        })
        .collect();

    Ok(HttpResponse::Ok().json(Envelope::ok(
        "Jobs fetched successfully",
        PageObject::new(items, page.total, query.page, query.size),
    )))
}

#[instrument(skip(state, identity))]
pub async fn job_details(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    resolve_caller(&state, &identity).await?;

    let job = state
        .jobs
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    Ok(HttpResponse::Ok().json(Envelope::ok(
        "Job fetched successfully",
        JobDetail {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            status: job.status,
            created_at: job.created_at,
            created_by: job.created_by,
        },
    )))
}
