//! Signup, email verification and login.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::instrument;

use jobboard_core::domain::User;
use jobboard_core::error::RepoError;
use jobboard_core::ports::{
    BaseRepository, Notification, NotificationQueue, PasswordService, TokenOutcome, TokenService,
    UserRepository,
};
use jobboard_core::validation::validate_signup;
use jobboard_shared::dto::{LoginObject, LoginRequest, SignupObject, SignupRequest, VerifyEmailQuery};
use jobboard_shared::Envelope;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Build the verification mail and hand it to the queue. Delivery is
/// best-effort; a full queue must not fail the request that triggered it.
async fn dispatch_verification_email(state: &AppState, user: &User, token: &str) {
    let link = format!("{}/api/verify-email?token={}", state.base_url, token);
    let notification = Notification::new(
        user.email.clone(),
        "Verify your email",
        format!(
            "Hi {},\n\nPlease verify your email by clicking the link below:\n\n{}",
            user.name, link
        ),
    );

    if let Err(e) = state.notifications.submit(notification).await {
        tracing::warn!(user_id = %user.id, error = %e, "Failed to queue verification email");
    }
}

#[instrument(skip(state, tokens, request), fields(email = %request.email))]
pub async fn signup(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    request: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let request = request.into_inner();

    let errors = validate_signup(&request.name, &request.email, &request.password);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Pre-check for a friendlier message; the unique index still decides
    // under concurrency.
    if state.users.find_by_email(&request.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = state.passwords.hash(&request.password)?;
    let user = User::new(request.name, request.email, password_hash, request.role);

    let user = match state.users.insert(user).await {
        Ok(user) => user,
        Err(RepoError::UniqueViolation(_)) => {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let token = tokens.issue_verification(user.id)?;
    dispatch_verification_email(&state, &user, &token).await;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");

    Ok(HttpResponse::Created().json(Envelope::ok(
        "User created successfully. Please verify your email.",
        SignupObject { user_id: user.id },
    )))
}

#[instrument(skip(state, tokens, query))]
pub async fn verify_email(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    query: web::Query<VerifyEmailQuery>,
) -> AppResult<HttpResponse> {
    match tokens.verify_verification(&query.token) {
        TokenOutcome::Valid(claims) => {
            let user = state
                .users
                .find_by_id(claims.user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            if user.verified {
                return Ok(
                    HttpResponse::Ok().json(Envelope::ok_empty("Email already verified"))
                );
            }

            state.users.mark_verified(user.id).await?;
            tracing::info!(user_id = %user.id, "Email verified");

            Ok(HttpResponse::Ok().json(Envelope::ok_empty("Email verified successfully")))
        }
        TokenOutcome::Expired(claims) => {
            // The signature checked out, so the subject is trustworthy.
            // Reissue silently instead of stranding the user.
            let user = state
                .users
                .find_by_id(claims.user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            if user.verified {
                return Ok(
                    HttpResponse::Ok().json(Envelope::ok_empty("Email already verified"))
                );
            }

            let token = tokens.issue_verification(user.id)?;
            dispatch_verification_email(&state, &user, &token).await;

            Ok(HttpResponse::Ok().json(Envelope::<serde_json::Value>::fail(
                "Verification link expired; a new one has been sent to your email",
                vec!["Token expired".to_string()],
            )))
        }
        TokenOutcome::Invalid => Err(AppError::Unauthorized),
    }
}

#[instrument(skip(state, tokens, request), fields(email = %request.email))]
pub async fn login(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    request: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !state.passwords.verify(&request.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    if !user.verified {
        return Err(AppError::EmailNotVerified);
    }

    let token = tokens.issue_access(user.id, user.role)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().json(Envelope::ok(
        "Login successful",
        LoginObject {
            token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.access_ttl_seconds(),
        },
    )))
}
