//! HTTP handlers.

pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;

#[cfg(test)]
mod tests;

use actix_web::web;

use jobboard_core::domain::User;
use jobboard_core::ports::BaseRepository;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppError;
use crate::state::AppState;

/// Load the caller's account. A valid token whose subject no longer exists
/// is treated the same as no token.
pub(crate) async fn resolve_caller(
    state: &AppState,
    identity: &Identity,
) -> Result<User, AppError> {
    state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

/// Configure all API routes. Literal segments are registered before the
/// `{job_id}` capture so `/jobs/browse` and `/jobs/my` are never swallowed
/// by it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/signup", web::post().to(auth::signup))
            .route("/verify-email", web::get().to(auth::verify_email))
            .route("/login", web::post().to(auth::login))
            .service(
                web::scope("/jobs")
                    .route("", web::post().to(jobs::create_job))
                    .route("/browse", web::get().to(jobs::browse_jobs))
                    .route("/my", web::get().to(jobs::my_jobs))
                    .route("/{job_id}", web::get().to(jobs::job_details))
                    .route("/{job_id}", web::put().to(jobs::update_job))
                    .route("/{job_id}", web::delete().to(jobs::delete_job))
                    .route(
                        "/{job_id}/applications",
                        web::get().to(applications::list_applications),
                    )
                    .route(
                        "/{job_id}/applications/{application_id}",
                        web::put().to(applications::set_application_status),
                    )
                    .route("/{job_id}/apply", web::post().to(applications::apply)),
            ),
    );
}
