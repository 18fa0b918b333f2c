//! Registered users and registration input.

use bloglist_core::{BlogId, DomainError, DomainResult, UserId};

pub const MISSING_CREDENTIALS: &str = "please fill required fields (username, password)";
pub const SHORT_CREDENTIALS: &str = "username and password must be at least 3 chars";
pub const USERNAME_TAKEN: &str = "username must be unique";
pub const INVALID_LOGIN: &str = "invalid username or password";

/// Minimum length (in characters) of usernames and passwords.
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// A stored user.
///
/// Deliberately not `Serialize`: responses are built from explicit views so
/// the password hash can't leak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    /// Owned blogs in creation order.
    pub blogs: Vec<BlogId>,
}

impl User {
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            username: new.username,
            name: new.name,
            password_hash: new.password_hash,
            blogs: Vec::new(),
        }
    }
}

/// Validated registration input. Holds the plaintext password until hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

impl core::fmt::Debug for Registration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Registration {
    pub fn validate(
        username: Option<String>,
        name: Option<String>,
        password: Option<String>,
    ) -> DomainResult<Self> {
        let (Some(username), Some(password)) = (
            username.filter(|u| !u.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            return Err(DomainError::validation(MISSING_CREDENTIALS));
        };

        if username.chars().count() < MIN_CREDENTIAL_LEN
            || password.chars().count() < MIN_CREDENTIAL_LEN
        {
            return Err(DomainError::validation(SHORT_CREDENTIALS));
        }

        Ok(Self {
            username,
            name,
            password,
        })
    }

    /// Swap the plaintext password for its hash.
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            username: self.username,
            name: self.name,
            password_hash,
        }
    }
}

/// A user ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}
