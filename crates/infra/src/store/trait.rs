use thiserror::Error;

use bloglist_auth::{NewUser, User};
use bloglist_blogs::{Blog, BlogChanges, NewBlog};
use bloglist_core::{BlogId, UserId};

/// Record store operation error.
///
/// These are infrastructure failures. Validation lives in the domain crates;
/// the only business rule a store enforces itself is username uniqueness.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The blog references an owner that does not exist.
    #[error("unknown owner: {0}")]
    UnknownOwner(UserId),

    /// A stored row could not be mapped back to a domain record.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Blog persistence.
///
/// `insert_blog` and `delete_blog` keep the owner's blog list in step with the
/// blog itself; callers never update the list on their own.
#[async_trait::async_trait]
pub trait BlogStore: Send + Sync {
    /// Store a blog under a fresh id and link it to its owner.
    async fn insert_blog(&self, new: NewBlog) -> Result<Blog, StoreError>;

    /// All blogs in creation order.
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError>;

    async fn find_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError>;

    /// Replace a blog's mutable fields. `None` when the id is unknown.
    async fn update_blog(&self, id: BlogId, changes: BlogChanges) -> Result<Option<Blog>, StoreError>;

    /// Remove a blog and unlink it from its owner. `false` when the id is unknown.
    async fn delete_blog(&self, id: BlogId) -> Result<bool, StoreError>;
}

/// User persistence.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Store a user under a fresh id.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when the username is taken;
    /// the check and the insert are one atomic step.
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError>;

    /// All users in registration order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// The full record store the API runs against.
pub trait Store: BlogStore + UserStore {}

impl<S> Store for S where S: BlogStore + UserStore + ?Sized {}
