//! HS256 bearer tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use bloglist_core::UserId;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad encoding, bad signature or wrong algorithm.
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Verifies a bearer token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Signs tokens for authenticated users.
pub trait JwtIssuer: Send + Sync {
    fn issue(&self, user_id: UserId, username: &str, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// Shared-secret HS256 issuer and validator.
pub struct Hs256JwtValidator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Hs256JwtValidator {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        // Expiry lives in our own claims and is checked by `validate_claims`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map_err(TokenError::Invalid)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

impl JwtIssuer for Hs256JwtValidator {
    fn issue(&self, user_id: UserId, username: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = JwtClaims {
            sub: user_id,
            username: username.to_string(),
            issued_at: now,
            expires_at: now + self.ttl,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(secret: &str) -> Hs256JwtValidator {
        Hs256JwtValidator::new(secret.as_bytes(), Duration::minutes(10))
    }

    #[test]
    fn issued_token_round_trips() {
        let jwt = validator("test-secret");
        let user_id = UserId::new();
        let now = Utc::now();

        let token = jwt.issue(user_id, "root", now).unwrap();
        let claims = jwt.validate(&token, now).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "root");
        assert_eq!(claims.expires_at, now + Duration::minutes(10));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let now = Utc::now();
        let token = validator("other-secret").issue(UserId::new(), "root", now).unwrap();

        let err = validator("test-secret").validate(&token, now).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = validator("test-secret");
        let issued = Utc::now();
        let token = jwt.issue(UserId::new(), "root", issued).unwrap();

        let err = jwt.validate(&token, issued + Duration::minutes(11)).unwrap_err();
        assert!(matches!(err, TokenError::Claims(TokenValidationError::Expired)));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = validator("test-secret").validate("not.a.token", Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }
}
