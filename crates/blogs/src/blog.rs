use serde::{Deserialize, Serialize};

use bloglist_core::{BlogId, DomainError, DomainResult, UserId};

pub const MISSING_FIELDS: &str = "make sure all required fields are sent (title, author, url)";
pub const MISSING_UPDATE_FIELDS: &str =
    "make sure all required fields are sent (title, author, url, likes)";
pub const NEGATIVE_LIKES: &str = "likes must be a non-negative integer";

/// A stored blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    /// Owning user, if any.
    pub user: Option<UserId>,
}

impl Blog {
    /// Materialize a validated draft under a store-assigned id.
    pub fn from_new(id: BlogId, new: NewBlog) -> Self {
        Self {
            id,
            title: new.title,
            author: new.author,
            url: new.url,
            likes: new.likes,
            user: new.user,
        }
    }

    /// Replace the mutable fields in place. Ownership is untouched.
    pub fn apply(&mut self, changes: BlogChanges) {
        self.title = changes.title;
        self.author = changes.author;
        self.url = changes.url;
        self.likes = changes.likes;
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user == Some(user_id)
    }
}

/// A validated blog that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: Option<UserId>,
}

impl NewBlog {
    /// Validate raw create input.
    ///
    /// `title`, `author` and `url` must be present and non-empty. `likes`
    /// defaults to zero when absent.
    pub fn validate(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
        user: Option<UserId>,
    ) -> DomainResult<Self> {
        let (Some(title), Some(author), Some(url)) =
            (non_empty(title), non_empty(author), non_empty(url))
        else {
            return Err(DomainError::validation(MISSING_FIELDS));
        };

        Ok(Self {
            title,
            author,
            url,
            likes: likes.map(checked_likes).transpose()?.unwrap_or(0),
            user,
        })
    }
}

/// Full replacement of a blog's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
}

impl BlogChanges {
    /// Validate raw update input.
    ///
    /// All four fields are required. `likes` only has to be present, so an
    /// explicit zero is a valid update.
    pub fn validate(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
    ) -> DomainResult<Self> {
        let (Some(title), Some(author), Some(url), Some(likes)) =
            (non_empty(title), non_empty(author), non_empty(url), likes)
        else {
            return Err(DomainError::validation(MISSING_UPDATE_FIELDS));
        };

        Ok(Self {
            title,
            author,
            url,
            likes: checked_likes(likes)?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn checked_likes(likes: i64) -> DomainResult<u64> {
    u64::try_from(likes).map_err(|_| DomainError::validation(NEGATIVE_LIKES))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn likes_default_to_zero() {
        let new = NewBlog::validate(s("Title"), s("Author"), s("https://example.com"), None, None)
            .unwrap();
        assert_eq!(new.likes, 0);
    }

    #[test]
    fn missing_or_empty_required_fields_are_rejected() {
        let cases = [
            (None, s("Author"), s("https://example.com")),
            (s("Title"), None, s("https://example.com")),
            (s("Title"), s("Author"), None),
            (s(""), s("Author"), s("https://example.com")),
        ];

        for (title, author, url) in cases {
            let err = NewBlog::validate(title, author, url, Some(1), None).unwrap_err();
            assert_eq!(err, DomainError::validation(MISSING_FIELDS));
        }
    }

    #[test]
    fn negative_likes_are_rejected() {
        let err = NewBlog::validate(s("T"), s("A"), s("U"), Some(-1), None).unwrap_err();
        assert_eq!(err, DomainError::validation(NEGATIVE_LIKES));
    }

    #[test]
    fn update_accepts_zero_likes() {
        let changes = BlogChanges::validate(s("T"), s("A"), s("U"), Some(0)).unwrap();
        assert_eq!(changes.likes, 0);
    }

    #[test]
    fn update_requires_likes() {
        let err = BlogChanges::validate(s("T"), s("A"), s("U"), None).unwrap_err();
        assert_eq!(err, DomainError::validation(MISSING_UPDATE_FIELDS));
    }

    #[test]
    fn apply_keeps_id_and_owner() {
        let owner = UserId::new();
        let id = BlogId::new();
        let mut blog = Blog::from_new(
            id,
            NewBlog::validate(s("T"), s("A"), s("U"), Some(3), Some(owner)).unwrap(),
        );

        blog.apply(BlogChanges::validate(s("T2"), s("A2"), s("U2"), Some(7)).unwrap());

        assert_eq!(blog.id, id);
        assert!(blog.is_owned_by(owner));
        assert_eq!(blog.title, "T2");
        assert_eq!(blog.likes, 7);
    }
}
