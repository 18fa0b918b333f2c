//! bcrypt password hashing.
//!
//! Both functions are CPU bound; async callers should run them on a blocking
//! thread.

use thiserror::Error;

/// Cost factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(#[from] bcrypt::BcryptError);

pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check `password` against a stored bcrypt hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(password, password_hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("secret", TEST_COST).unwrap();
        assert_ne!(hash, "secret");
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("Secret", &hash).unwrap());
    }

    #[test]
    fn rejects_out_of_range_cost() {
        assert!(hash_password("secret", 1).is_err());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("secret", "not-a-bcrypt-hash").is_err());
    }
}
