//! Postgres-backed record store.
//!
//! ## Schema
//!
//! Two tables, created idempotently by [`PostgresStore::migrate`]. Blog
//! ownership is the `blogs.user_id` foreign key, so a user's blog list is a
//! query rather than a second write. Username uniqueness is a `UNIQUE`
//! constraint, which makes registration an atomic insert-if-absent.
//!
//! ## Error Mapping
//!
//! | PostgreSQL code | StoreError |
//! |---|---|
//! | `23505` unique violation | `UniqueViolation` |
//! | `23503` foreign key violation (blog owner) | `UnknownOwner` |
//! | anything else, pool/network errors | `Unavailable` |

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::instrument;
use uuid::Uuid;

use bloglist_auth::{NewUser, User};
use bloglist_blogs::{Blog, BlogChanges, NewBlog};
use bloglist_core::{BlogId, UserId};

use super::r#trait::{BlogStore, StoreError, UserStore};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        username TEXT NOT NULL,
        name TEXT,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT users_username_key UNIQUE (username)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blogs (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        url TEXT NOT NULL,
        likes BIGINT NOT NULL DEFAULT 0 CHECK (likes >= 0),
        user_id UUID REFERENCES users (id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS blogs_user_id_idx ON blogs (user_id)",
];

/// Postgres record store.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Create tables and indexes if they are missing.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }
        Ok(())
    }

    async fn blog_ids_by_owner(
        &self,
        owner: Option<UserId>,
    ) -> Result<HashMap<UserId, Vec<BlogId>>, StoreError> {
        let owner_param: Option<Uuid> = owner.map(Uuid::from);
        let rows = sqlx::query(
            r#"
            SELECT id, user_id
            FROM blogs
            WHERE user_id IS NOT NULL
                AND ($1::uuid IS NULL OR user_id = $1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner_param)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("blog_ids_by_owner", e))?;

        let mut by_owner: HashMap<UserId, Vec<BlogId>> = HashMap::new();
        for row in rows {
            let id: Uuid = row.try_get("id").map_err(corrupt)?;
            let user_id: Uuid = row.try_get("user_id").map_err(corrupt)?;
            by_owner
                .entry(UserId::from_uuid(user_id))
                .or_default()
                .push(BlogId::from_uuid(id));
        }
        Ok(by_owner)
    }

    async fn with_blogs(&self, user: Option<User>) -> Result<Option<User>, StoreError> {
        let Some(mut user) = user else {
            return Ok(None);
        };
        user.blogs = self
            .blog_ids_by_owner(Some(user.id))
            .await?
            .remove(&user.id)
            .unwrap_or_default();
        Ok(Some(user))
    }
}

#[async_trait::async_trait]
impl BlogStore for PostgresStore {
    #[instrument(skip(self, new), fields(owner = ?new.user), err)]
    async fn insert_blog(&self, new: NewBlog) -> Result<Blog, StoreError> {
        let id = BlogId::new();
        let likes = likes_to_db(new.likes)?;
        let owner = new.user;

        sqlx::query(
            r#"
            INSERT INTO blogs (id, title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.url)
        .bind(likes)
        .bind(owner.map(Uuid::from))
        .execute(&*self.pool)
        .await
        .map_err(|e| match (owner, foreign_key_violation(&e)) {
            (Some(owner), true) => StoreError::UnknownOwner(owner),
            _ => map_sqlx_error("insert_blog", e),
        })?;

        Ok(Blog::from_new(id, new))
    }

    #[instrument(skip(self), err)]
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, url, likes, user_id
            FROM blogs
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_blogs", e))?;

        rows.iter().map(blog_from_row).collect()
    }

    #[instrument(skip(self), fields(blog_id = %id), err)]
    async fn find_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, url, likes, user_id
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_blog", e))?;

        row.as_ref().map(blog_from_row).transpose()
    }

    #[instrument(skip(self, changes), fields(blog_id = %id), err)]
    async fn update_blog(&self, id: BlogId, changes: BlogChanges) -> Result<Option<Blog>, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE blogs
            SET title = $2, author = $3, url = $4, likes = $5
            WHERE id = $1
            RETURNING id, title, author, url, likes, user_id
            "#,
        )
        .bind(id.as_uuid())
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.url)
        .bind(likes_to_db(changes.likes)?)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_blog", e))?;

        row.as_ref().map(blog_from_row).transpose()
    }

    #[instrument(skip(self), fields(blog_id = %id), err)]
    async fn delete_blog(&self, id: BlogId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_blog", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresStore {
    #[instrument(skip(self, new), fields(username = %new.username), err)]
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let id = UserId::new();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, name, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.username)
        .bind(new.name.as_deref())
        .bind(&new.password_hash)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_user", e))?;

        Ok(User::from_new(id, new))
    }

    #[instrument(skip(self), err)]
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, name, password_hash
            FROM users
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_users", e))?;

        let mut blogs = self.blog_ids_by_owner(None).await?;
        rows.iter()
            .map(|row| {
                let mut user = user_from_row(row)?;
                user.blogs = blogs.remove(&user.id).unwrap_or_default();
                Ok(user)
            })
            .collect()
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, name, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user", e))?;

        let user = row.as_ref().map(user_from_row).transpose()?;
        self.with_blogs(user).await
    }

    #[instrument(skip(self), err)]
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, name, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_username", e))?;

        let user = row.as_ref().map(user_from_row).transpose()?;
        self.with_blogs(user).await
    }
}

fn blog_from_row(row: &PgRow) -> Result<Blog, StoreError> {
    let id: Uuid = row.try_get("id").map_err(corrupt)?;
    let likes: i64 = row.try_get("likes").map_err(corrupt)?;
    let user_id: Option<Uuid> = row.try_get("user_id").map_err(corrupt)?;

    Ok(Blog {
        id: BlogId::from_uuid(id),
        title: row.try_get("title").map_err(corrupt)?,
        author: row.try_get("author").map_err(corrupt)?,
        url: row.try_get("url").map_err(corrupt)?,
        likes: u64::try_from(likes)
            .map_err(|_| StoreError::Corrupt(format!("negative likes on blog {id}")))?,
        user: user_id.map(UserId::from_uuid),
    })
}

// `blogs` is filled in separately.
fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    let id: Uuid = row.try_get("id").map_err(corrupt)?;

    Ok(User {
        id: UserId::from_uuid(id),
        username: row.try_get("username").map_err(corrupt)?,
        name: row.try_get("name").map_err(corrupt)?,
        password_hash: row.try_get("password_hash").map_err(corrupt)?,
        blogs: Vec::new(),
    })
}

fn likes_to_db(likes: u64) -> Result<i64, StoreError> {
    i64::try_from(likes).map_err(|_| StoreError::Corrupt(format!("likes out of range: {likes}")))
}

fn corrupt(err: sqlx::Error) -> StoreError {
    StoreError::Corrupt(err.to_string())
}

fn foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503"))
}

/// Map SQLx errors to `StoreError`.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::UniqueViolation(msg),
                _ => StoreError::Unavailable(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {}: {}", operation, err)),
    }
}
