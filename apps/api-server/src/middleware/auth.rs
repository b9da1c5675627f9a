//! Bearer-token authentication extractor.
//!
//! Handlers that take an [`Identity`] parameter require a valid access token;
//! extraction fails with 401 before the handler body runs.

use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use jobboard_core::domain::Role;
use jobboard_core::ports::{AuthError, TokenService};
use jobboard_shared::Envelope;

/// The authenticated caller, recovered from the access token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

/// Wrapper so extraction failures render the uniform envelope.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthenticationError(pub AuthError);

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self.0 {
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match &self.0 {
            AuthError::MissingAuth => "Missing authorization header",
            AuthError::TokenExpired => "Token expired",
            _ => "Invalid or expired token",
        };
        let envelope: Envelope<serde_json::Value> =
            Envelope::fail(message, vec![self.0.to_string()]);
        HttpResponse::build(self.status_code()).json(envelope)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or(AuthError::MissingAuth)?;
    let value = header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Malformed authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected a bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_identity(req).map_err(AuthenticationError))
    }
}

fn extract_identity(req: &HttpRequest) -> Result<Identity, AuthError> {
    let tokens = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| AuthError::InvalidToken("Token service not configured".to_string()))?;

    let token = bearer_token(req)?;
    let claims = tokens.verify_access(token)?;
    let role = claims
        .role
        .ok_or_else(|| AuthError::InvalidToken("Token carries no role".to_string()))?;

    Ok(Identity {
        user_id: claims.user_id,
        role,
    })
}
