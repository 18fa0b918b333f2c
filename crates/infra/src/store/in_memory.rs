use std::collections::BTreeMap;
use std::sync::RwLock;

use bloglist_auth::{NewUser, User};
use bloglist_blogs::{Blog, BlogChanges, NewBlog};
use bloglist_core::{BlogId, UserId};

use super::r#trait::{BlogStore, StoreError, UserStore};

#[derive(Debug, Default)]
struct Records {
    // UUIDv7 keys keep BTreeMap iteration in creation order.
    blogs: BTreeMap<BlogId, Blog>,
    users: BTreeMap<UserId, User>,
}

/// In-memory record store.
///
/// Intended for tests/dev. One lock guards both collections, so writes that
/// touch a blog and its owner are atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Records>, StoreError> {
        self.records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Records>, StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl BlogStore for InMemoryStore {
    async fn insert_blog(&self, new: NewBlog) -> Result<Blog, StoreError> {
        let mut records = self.write()?;
        let id = BlogId::new();

        if let Some(owner_id) = new.user {
            let owner = records
                .users
                .get_mut(&owner_id)
                .ok_or(StoreError::UnknownOwner(owner_id))?;
            owner.blogs.push(id);
        }

        let blog = Blog::from_new(id, new);
        records.blogs.insert(id, blog.clone());
        Ok(blog)
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        Ok(self.read()?.blogs.values().cloned().collect())
    }

    async fn find_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError> {
        Ok(self.read()?.blogs.get(&id).cloned())
    }

    async fn update_blog(&self, id: BlogId, changes: BlogChanges) -> Result<Option<Blog>, StoreError> {
        let mut records = self.write()?;
        Ok(records.blogs.get_mut(&id).map(|blog| {
            blog.apply(changes);
            blog.clone()
        }))
    }

    async fn delete_blog(&self, id: BlogId) -> Result<bool, StoreError> {
        let mut records = self.write()?;
        let Some(blog) = records.blogs.remove(&id) else {
            return Ok(false);
        };

        if let Some(owner) = blog.user.and_then(|owner_id| records.users.get_mut(&owner_id)) {
            owner.blogs.retain(|b| *b != id);
        }
        Ok(true)
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut records = self.write()?;

        if records.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::UniqueViolation(format!(
                "username {:?} already exists",
                new.username
            )));
        }

        let id = UserId::new();
        let user = User::from_new(id, new);
        records.users.insert(id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}
