use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bloglist_core::UserId;

/// Claims carried by a login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the user the token was issued to.
    pub sub: UserId,

    /// Username at the time of issue.
    pub username: String,

    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time window of decoded claims.
///
/// Signature verification happens before this, in the token validator.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_at: DateTime<Utc>, ttl: Duration) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            username: "root".to_string(),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    #[test]
    fn accepts_claims_inside_the_window() {
        let now = Utc::now();
        assert_eq!(validate_claims(&claims(now, Duration::minutes(5)), now), Ok(()));
    }

    #[test]
    fn rejects_expired_claims() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(10), Duration::minutes(5));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::Expired));
    }

    #[test]
    fn rejects_future_claims() {
        let now = Utc::now();
        let c = claims(now + Duration::minutes(1), Duration::minutes(5));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn rejects_inverted_window() {
        let now = Utc::now();
        let c = claims(now, Duration::zero());
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::InvalidTimeWindow));
    }
}
