//! Authentication ports: password hashing and signed, expiring tokens.

use uuid::Uuid;

use crate::domain::Role;

/// The two token kinds the system issues. A token of one kind is never
/// accepted where the other is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Verification,
}

impl TokenKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Verification => "verification",
        }
    }
}

/// Claims recovered from a token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    /// Present on access tokens only.
    pub role: Option<Role>,
    pub kind: TokenKind,
    pub exp: i64,
}

/// Three-way outcome for verification tokens. Expired-but-signature-valid is
/// kept distinct from invalid so the caller can silently reissue only in the
/// legitimate-but-stale case.
#[derive(Debug)]
pub enum TokenOutcome {
    Valid(TokenClaims),
    Expired(TokenClaims),
    Invalid,
}

/// Token service for issuing and verifying signed, expiring tokens.
pub trait TokenService: Send + Sync {
    /// Issue an access token embedding subject id and role.
    fn issue_access(&self, user_id: Uuid, role: Role) -> Result<String, AuthError>;

    /// Issue an email-verification token for a subject.
    fn issue_verification(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Validate an access token. Expiry is strictly enforced; there is no
    /// reissue path for access tokens.
    fn verify_access(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Verify an email-verification token with the three-way outcome.
    fn verify_verification(&self, token: &str) -> TokenOutcome;

    /// Access token lifetime, for the login response.
    fn access_ttl_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
