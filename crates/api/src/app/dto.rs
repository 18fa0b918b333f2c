use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bloglist_auth::User;
use bloglist_blogs::Blog;
use bloglist_core::{BlogId, UserId};

// -------------------------
// Request DTOs
// -------------------------

// Fields are optional so that absent values surface as validation errors
// with a descriptive message rather than as JSON rejections.

#[derive(Debug, Default, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Full replacement body. Unknown fields such as `id` or `user` are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Default, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl core::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// A blog as stored, with the owner as a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogResponse {
    pub id: BlogId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: Option<UserId>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: blog.user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub username: String,
    pub name: Option<String>,
    pub id: UserId,
}

/// A blog in the listing, with its owner expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogListItem {
    pub id: BlogId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: Option<OwnerSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogSummary {
    pub url: String,
    pub title: String,
    pub author: String,
    pub id: BlogId,
}

/// A user without the password hash, with owned blogs expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

// -------------------------
// Mapping helpers
// -------------------------

/// Expand each blog's owner from `users`. Owners that no longer exist become `null`.
pub fn blogs_with_owners(blogs: Vec<Blog>, users: &[User]) -> Vec<BlogListItem> {
    let by_id: HashMap<UserId, &User> = users.iter().map(|u| (u.id, u)).collect();

    blogs
        .into_iter()
        .map(|blog| BlogListItem {
            user: blog
                .user
                .and_then(|id| by_id.get(&id))
                .map(|owner| OwnerSummary {
                    username: owner.username.clone(),
                    name: owner.name.clone(),
                    id: owner.id,
                }),
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        })
        .collect()
}

/// Expand each user's blog ids from `blogs`, keeping the user's own order.
pub fn users_with_blogs(users: Vec<User>, blogs: &[Blog]) -> Vec<UserResponse> {
    let by_id: HashMap<BlogId, &Blog> = blogs.iter().map(|b| (b.id, b)).collect();

    users
        .into_iter()
        .map(|user| {
            let owned = user
                .blogs
                .iter()
                .filter_map(|id| by_id.get(id))
                .map(|blog| BlogSummary {
                    url: blog.url.clone(),
                    title: blog.title.clone(),
                    author: blog.author.clone(),
                    id: blog.id,
                })
                .collect();
            user_response(user, owned)
        })
        .collect()
}

pub fn user_response(user: User, blogs: Vec<BlogSummary>) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        name: user.name,
        blogs,
    }
}
