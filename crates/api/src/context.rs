use bloglist_auth::User;
use bloglist_core::UserId;

/// The authenticated caller of a request.
///
/// Attached by the auth middleware when the request carries a valid bearer
/// token whose subject still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    id: UserId,
    username: String,
}

impl CurrentUser {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.username.clone())
    }
}
