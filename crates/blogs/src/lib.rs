//! Blog records and reporting statistics.
//!
//! Pure domain logic: validation of incoming blog fields and aggregation over
//! a list of blogs. No IO, no HTTP, no storage.

pub mod blog;
pub mod stats;

pub use blog::{Blog, BlogChanges, NewBlog};
pub use stats::{
    AuthorBlogs, AuthorLikes, BlogStats, FavoriteBlog, favorite_blog, most_blogs, most_likes,
    total_likes,
};
