//! Application services: the operations behind each route.
//!
//! Handlers stay thin; everything that touches the store, hashes a password
//! or signs a token goes through [`AppServices`].

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};

use bloglist_auth::user::{INVALID_LOGIN, USERNAME_TAKEN};
use bloglist_auth::{
    Hs256JwtValidator, JwtIssuer, JwtValidator, Registration, User, hash_password,
    verify_password,
};
use bloglist_blogs::{Blog, BlogChanges, BlogStats, NewBlog};
use bloglist_core::BlogId;
use bloglist_infra::{AppConfig, InMemoryStore, PostgresStore, Store, StoreError};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::context::CurrentUser;

pub const BLOG_NOT_FOUND: &str = "blog not found";
pub const NOT_BLOG_OWNER: &str = "only the creator can delete a blog";
pub const TOKEN_REQUIRED: &str = "token missing or invalid";

/// Injected dependencies shared by all handlers.
pub struct AppServices {
    store: Arc<dyn Store>,
    jwt: Arc<Hs256JwtValidator>,
    bcrypt_cost: u32,
}

impl AppServices {
    pub fn new(store: Arc<dyn Store>, jwt: Arc<Hs256JwtValidator>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            jwt,
            bcrypt_cost,
        }
    }

    /// Wire services from configuration, connecting to Postgres when a
    /// `DATABASE_URL` is configured.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn Store> = match &config.database_url {
            Some(url) => {
                let store = PostgresStore::connect(url)
                    .await
                    .context("failed to connect to Postgres")?;
                tracing::info!("using Postgres record store");
                Arc::new(store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set; records are kept in memory only");
                Arc::new(InMemoryStore::new())
            }
        };

        Ok(Self::with_store(store, config))
    }

    /// Wire services around an existing store (tests/dev).
    pub fn with_store(store: Arc<dyn Store>, config: &AppConfig) -> Self {
        let jwt = Hs256JwtValidator::new(
            config.jwt_secret.as_bytes(),
            Duration::seconds(config.token_ttl_secs),
        );
        Self::new(store, Arc::new(jwt), config.bcrypt_cost)
    }

    pub fn store(&self) -> Arc<dyn Store> {
        self.store.clone()
    }

    pub fn jwt(&self) -> Arc<dyn JwtValidator> {
        self.jwt.clone()
    }

    // -------------------------
    // Blogs
    // -------------------------

    pub async fn list_blogs(&self) -> Result<Vec<dto::BlogListItem>, ApiError> {
        let blogs = self.store.list_blogs().await?;
        let users = self.store.list_users().await?;
        Ok(dto::blogs_with_owners(blogs, &users))
    }

    pub async fn create_blog(
        &self,
        caller: &CurrentUser,
        body: dto::CreateBlogRequest,
    ) -> Result<Blog, ApiError> {
        let new = NewBlog::validate(body.title, body.author, body.url, body.likes, Some(caller.id()))?;

        let blog = self.store.insert_blog(new).await.map_err(|e| match e {
            // The caller was deleted between authentication and insert.
            StoreError::UnknownOwner(_) => ApiError::unauthorized(TOKEN_REQUIRED),
            other => other.into(),
        })?;

        tracing::info!(
            blog_id = %blog.id,
            owner = %caller.id(),
            username = %caller.username(),
            "blog created"
        );
        Ok(blog)
    }

    pub async fn get_blog(&self, id: BlogId) -> Result<Blog, ApiError> {
        self.store.find_blog(id).await?.ok_or(ApiError::NotFound)
    }

    pub async fn update_blog(&self, id: BlogId, body: dto::UpdateBlogRequest) -> Result<Blog, ApiError> {
        let changes = BlogChanges::validate(body.title, body.author, body.url, body.likes)?;
        self.store
            .update_blog(id, changes)
            .await?
            .ok_or(ApiError::MissingRecord(BLOG_NOT_FOUND))
    }

    pub async fn delete_blog(&self, caller: &CurrentUser, id: BlogId) -> Result<(), ApiError> {
        let blog = self
            .store
            .find_blog(id)
            .await?
            .ok_or(ApiError::MissingRecord(BLOG_NOT_FOUND))?;

        if !blog.is_owned_by(caller.id()) {
            return Err(ApiError::unauthorized(NOT_BLOG_OWNER));
        }

        if !self.store.delete_blog(id).await? {
            // Lost a race with another delete of the same blog.
            return Err(ApiError::MissingRecord(BLOG_NOT_FOUND));
        }

        tracing::info!(
            blog_id = %id,
            owner = %caller.id(),
            username = %caller.username(),
            "blog deleted"
        );
        Ok(())
    }

    pub async fn stats(&self) -> Result<BlogStats, ApiError> {
        let blogs = self.store.list_blogs().await?;
        Ok(BlogStats::from_blogs(&blogs))
    }

    // -------------------------
    // Users
    // -------------------------

    pub async fn list_users(&self) -> Result<Vec<dto::UserResponse>, ApiError> {
        let users = self.store.list_users().await?;
        let blogs = self.store.list_blogs().await?;
        Ok(dto::users_with_blogs(users, &blogs))
    }

    pub async fn register(&self, body: dto::RegisterUserRequest) -> Result<User, ApiError> {
        let registration = Registration::validate(body.username, body.name, body.password)?;

        let cost = self.bcrypt_cost;
        let password = registration.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

        let user = self
            .store
            .insert_user(registration.into_new_user(password_hash))
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => ApiError::validation(USERNAME_TAKEN),
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub async fn login(&self, body: dto::LoginRequest) -> Result<dto::LoginResponse, ApiError> {
        let (Some(username), Some(password)) = (body.username, body.password) else {
            return Err(ApiError::unauthorized(INVALID_LOGIN));
        };

        let Some(user) = self.store.find_user_by_username(&username).await? else {
            return Err(ApiError::unauthorized(INVALID_LOGIN));
        };

        let password_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash)).await??;
        if !matches {
            tracing::debug!(username = %user.username, "password mismatch");
            return Err(ApiError::unauthorized(INVALID_LOGIN));
        }

        let token = self.jwt.issue(user.id, &user.username, Utc::now())?;
        Ok(dto::LoginResponse {
            token,
            username: user.username,
            name: user.name,
        })
    }
}
