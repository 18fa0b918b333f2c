//! `bloglist-auth`: users, credentials and bearer tokens.
//!
//! Decoupled from HTTP and storage: callers hand in raw input and get back
//! validated values, password hashes or verified claims.

pub mod claims;
pub mod password;
pub mod token;
pub mod user;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use password::{PasswordError, hash_password, verify_password};
pub use token::{Hs256JwtValidator, JwtIssuer, JwtValidator, TokenError};
pub use user::{NewUser, Registration, User};
