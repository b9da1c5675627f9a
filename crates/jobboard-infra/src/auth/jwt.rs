//! JWT token service implementation.
//!
//! Two token kinds share the signing secret: short-lived access tokens
//! carrying the subject's role, and email-verification tokens carrying only
//! the subject. Verification tokens get the three-way verify so an expired
//! but untampered link can be silently reissued.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobboard_core::domain::Role;
use jobboard_core::ports::{AuthError, TokenClaims, TokenKind, TokenOutcome, TokenService};

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_minutes: i64,
    pub verification_ttl_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_ttl_minutes: 60,
            verification_ttl_minutes: 60,
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    kind: String,
    iat: i64,
    exp: i64,
}

impl Claims {
    fn into_token_claims(self) -> Option<TokenClaims> {
        let user_id = Uuid::parse_str(&self.sub).ok()?;
        let kind = match self.kind.as_str() {
            "access" => TokenKind::Access,
            "verification" => TokenKind::Verification,
            _ => return None,
        };
        let role = match self.role {
            Some(r) => Some(Role::parse(&r)?),
            None => None,
        };
        Some(TokenClaims {
            user_id,
            role,
            kind,
            exp: self.exp,
        })
    }
}

/// HS256 token service keyed by a process-wide secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    fn issue(
        &self,
        user_id: Uuid,
        role: Option<Role>,
        kind: TokenKind,
        ttl_minutes: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::minutes(ttl_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.map(|r| r.as_str().to_string()),
            kind: kind.as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn decode(&self, token: &str, validate_exp: bool) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.validate_exp = validate_exp;
        if !validate_exp {
            validation.required_spec_claims.clear();
        }
        decode::<Claims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }
}

impl TokenService for JwtTokenService {
    fn issue_access(&self, user_id: Uuid, role: Role) -> Result<String, AuthError> {
        self.issue(
            user_id,
            Some(role),
            TokenKind::Access,
            self.config.access_ttl_minutes,
        )
    }

    fn issue_verification(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.issue(
            user_id,
            None,
            TokenKind::Verification,
            self.config.verification_ttl_minutes,
        )
    }

    fn verify_access(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let claims = self.decode(token, true).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })?;

        let claims = claims
            .into_token_claims()
            .ok_or_else(|| AuthError::InvalidToken("Malformed claims".to_string()))?;

        if claims.kind != TokenKind::Access || claims.role.is_none() {
            return Err(AuthError::InvalidToken("Not an access token".to_string()));
        }

        Ok(claims)
    }

    fn verify_verification(&self, token: &str) -> TokenOutcome {
        match self.decode(token, true) {
            Ok(claims) => match claims.into_token_claims() {
                Some(claims) if claims.kind == TokenKind::Verification => {
                    TokenOutcome::Valid(claims)
                }
                _ => TokenOutcome::Invalid,
            },
            Err(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) => {
                // Signature is valid but the token is stale. Re-decode with
                // expiry checks off so the subject stays recoverable for the
                // reissue flow.
                match self.decode(token, false).ok().and_then(Claims::into_token_claims) {
                    Some(claims) if claims.kind == TokenKind::Verification => {
                        TokenOutcome::Expired(claims)
                    }
                    _ => TokenOutcome::Invalid,
                }
            }
            Err(_) => TokenOutcome::Invalid,
        }
    }

    fn access_ttl_seconds(&self) -> i64 {
        self.config.access_ttl_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            access_ttl_minutes: 60,
            verification_ttl_minutes: 60,
        }
    }

    // Past the default leeway of the validator.
    fn expired_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            access_ttl_minutes: -5,
            verification_ttl_minutes: -5,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service.issue_access(user_id, Role::Company).unwrap();
        let claims = service.verify_access(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, Some(Role::Company));
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_verification_token_round_trip() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service.issue_verification(user_id).unwrap();

        match service.verify_verification(&token) {
            TokenOutcome::Valid(claims) => {
                assert_eq!(claims.user_id, user_id);
                assert_eq!(claims.kind, TokenKind::Verification);
                assert!(claims.role.is_none());
            }
            other => panic!("expected Valid, got {other:?}"),
        }
    }

    #[test]
    fn test_expired_verification_token_keeps_payload() {
        let service = JwtTokenService::new(expired_config());
        let user_id = Uuid::new_v4();

        let token = service.issue_verification(user_id).unwrap();

        match service.verify_verification(&token) {
            TokenOutcome::Expired(claims) => assert_eq!(claims.user_id, user_id),
            other => panic!("expected Expired, got {other:?}"),
        }
    }

    #[test]
    fn test_expired_access_token_rejected() {
        let service = JwtTokenService::new(expired_config());

        let token = service.issue_access(Uuid::new_v4(), Role::Applicant).unwrap();
        let result = service.verify_access(&token);

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_is_invalid_without_payload() {
        let issuer = JwtTokenService::new(test_config());
        let verifier = JwtTokenService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        });

        let token = issuer.issue_verification(Uuid::new_v4()).unwrap();

        assert!(matches!(
            verifier.verify_verification(&token),
            TokenOutcome::Invalid
        ));
        assert!(verifier.verify_access(&token).is_err());
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let service = JwtTokenService::new(test_config());

        assert!(matches!(
            service.verify_verification("not-a-token"),
            TokenOutcome::Invalid
        ));
        assert!(service.verify_access("not-a-token").is_err());
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let access = service.issue_access(user_id, Role::Applicant).unwrap();
        let verification = service.issue_verification(user_id).unwrap();

        assert!(matches!(
            service.verify_verification(&access),
            TokenOutcome::Invalid
        ));
        assert!(service.verify_access(&verification).is_err());
    }

    #[test]
    fn test_access_ttl_seconds() {
        let service = JwtTokenService::new(test_config());
        assert_eq!(service.access_ttl_seconds(), 3600);
    }
}
