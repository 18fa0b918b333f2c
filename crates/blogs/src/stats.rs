//! Reporting statistics over a list of blogs.
//!
//! Every function here is total: an empty slice yields zero or `None`, never
//! an error. Author grouping is exact and case-sensitive. When two candidates
//! tie, the one seen first in input order wins. Like sums saturate at
//! `u64::MAX` instead of overflowing.

use std::collections::HashMap;

use serde::Serialize;

use crate::Blog;

/// The most liked blog, reduced to its reporting fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: String,
    pub likes: u64,
}

/// Author with the largest number of blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

/// Author with the largest cumulative likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// All statistics over one snapshot of blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    pub fn from_blogs(blogs: &[Blog]) -> Self {
        Self {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}

/// Sum of likes across all blogs.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs.iter().fold(0u64, |sum, b| sum.saturating_add(b.likes))
}

/// The blog with the most likes (first one on ties).
pub fn favorite_blog(blogs: &[Blog]) -> Option<FavoriteBlog> {
    let mut best: Option<&Blog> = None;
    for blog in blogs {
        if best.is_none_or(|b| blog.likes > b.likes) {
            best = Some(blog);
        }
    }

    best.map(|b| FavoriteBlog {
        title: b.title.clone(),
        author: b.author.clone(),
        likes: b.likes,
    })
}

/// The author who wrote the most blogs.
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogs> {
    max_by_author(blogs, |count: usize, _| count + 1)
        .map(|(author, blogs)| AuthorBlogs { author, blogs })
}

/// The author whose blogs collected the most likes in total.
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    max_by_author(blogs, |sum: u64, b| sum.saturating_add(b.likes))
        .map(|(author, likes)| AuthorLikes { author, likes })
}

/// Group by author in first-seen order, fold each group with `step`, and
/// return the first group holding the maximum.
fn max_by_author<W, F>(blogs: &[Blog], step: F) -> Option<(String, W)>
where
    W: Copy + Default + PartialOrd,
    F: Fn(W, &Blog) -> W,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, W)> = Vec::new();

    for blog in blogs {
        let idx = *slots.entry(blog.author.as_str()).or_insert_with(|| {
            groups.push((blog.author.as_str(), W::default()));
            groups.len() - 1
        });
        groups[idx].1 = step(groups[idx].1, blog);
    }

    let mut best: Option<(&str, W)> = None;
    for (author, total) in groups {
        if best.is_none_or(|(_, b)| total > b) {
            best = Some((author, total));
        }
    }

    best.map(|(author, total)| (author.to_string(), total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloglist_core::BlogId;
    use proptest::prelude::*;

    fn blog(title: &str, author: &str, likes: u64) -> Blog {
        Blog {
            id: BlogId::new(),
            title: title.to_string(),
            author: author.to_string(),
            url: format!("https://example.com/{title}"),
            likes,
            user: None,
        }
    }

    fn sample() -> Vec<Blog> {
        vec![
            blog("React patterns", "Michael Chan", 7),
            blog("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
            blog("Canonical string reduction", "Edsger W. Dijkstra", 12),
            blog("First class tests", "Robert C. Martin", 10),
            blog("TDD harms architecture", "Robert C. Martin", 0),
            blog("Type wars", "Robert C. Martin", 2),
        ]
    }

    #[test]
    fn empty_input_yields_empty_results() {
        let stats = BlogStats::from_blogs(&[]);
        assert_eq!(stats.total_likes, 0);
        assert_eq!(stats.favorite_blog, None);
        assert_eq!(stats.most_blogs, None);
        assert_eq!(stats.most_likes, None);
    }

    #[test]
    fn single_blog_is_its_own_summary() {
        let blogs = vec![blog("Only", "Solo", 5)];
        assert_eq!(total_likes(&blogs), 5);
        assert_eq!(
            favorite_blog(&blogs),
            Some(FavoriteBlog {
                title: "Only".to_string(),
                author: "Solo".to_string(),
                likes: 5,
            })
        );
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: "Solo".to_string(),
                blogs: 1,
            })
        );
    }

    #[test]
    fn total_likes_of_sample() {
        assert_eq!(total_likes(&sample()), 36);
    }

    #[test]
    fn favorite_is_the_most_liked() {
        let blogs = vec![blog("a", "A", 5), blog("b", "B", 10), blog("c", "C", 3)];
        let fav = favorite_blog(&blogs).unwrap();
        assert_eq!(fav.title, "b");
        assert_eq!(fav.likes, 10);
    }

    #[test]
    fn favorite_tie_goes_to_first_occurrence() {
        let blogs = vec![blog("first", "A", 9), blog("second", "B", 9)];
        assert_eq!(favorite_blog(&blogs).unwrap().title, "first");
    }

    #[test]
    fn most_blogs_and_most_likes_can_differ() {
        let blogs = vec![
            blog("a1", "A", 3),
            blog("a2", "A", 3),
            blog("a3", "A", 4),
            blog("b1", "B", 50),
        ];

        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: "A".to_string(),
                blogs: 3,
            })
        );
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: "B".to_string(),
                likes: 50,
            })
        );
    }

    #[test]
    fn sample_aggregates() {
        let blogs = sample();
        assert_eq!(most_blogs(&blogs).unwrap().author, "Robert C. Martin");
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: "Edsger W. Dijkstra".to_string(),
                likes: 17,
            })
        );
    }

    #[test]
    fn group_ties_go_to_first_seen_author() {
        let blogs = vec![blog("x", "Zed", 4), blog("y", "Amy", 4)];
        assert_eq!(most_blogs(&blogs).unwrap().author, "Zed");
        assert_eq!(most_likes(&blogs).unwrap().author, "Zed");
    }

    #[test]
    fn authors_are_case_sensitive() {
        let blogs = vec![blog("1", "ann", 1), blog("2", "Ann", 1), blog("3", "Ann", 1)];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: "Ann".to_string(),
                blogs: 2,
            })
        );
    }

    #[test]
    fn huge_like_counts_saturate() {
        let max = i64::MAX as u64;
        let blogs = vec![blog("a", "A", max), blog("b", "A", max), blog("c", "B", max)];

        assert_eq!(total_likes(&blogs), u64::MAX);
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: "A".to_string(),
                likes: u64::MAX - 1,
            })
        );
        assert_eq!(BlogStats::from_blogs(&blogs).favorite_blog.unwrap().title, "a");
    }

    #[test]
    fn stats_serialize_empty_results_as_null() {
        let json = serde_json::to_value(BlogStats::from_blogs(&[])).unwrap();
        assert_eq!(json["total_likes"], 0);
        assert!(json["favorite_blog"].is_null());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Reversing the input never changes the total.
        #[test]
        fn total_likes_is_order_independent(likes in prop::collection::vec(0u64..10_000, 0..20)) {
            let mut blogs: Vec<Blog> = likes
                .iter()
                .enumerate()
                .map(|(i, l)| blog(&i.to_string(), "author", *l))
                .collect();
            let forward = total_likes(&blogs);
            blogs.reverse();

            prop_assert_eq!(forward, total_likes(&blogs));
            prop_assert_eq!(forward, likes.iter().sum::<u64>());
        }

        /// No blog has more likes than the favorite.
        #[test]
        fn favorite_has_maximal_likes(likes in prop::collection::vec(0u64..10_000, 1..20)) {
            let blogs: Vec<Blog> = likes
                .iter()
                .enumerate()
                .map(|(i, l)| blog(&i.to_string(), "author", *l))
                .collect();
            let fav = favorite_blog(&blogs).unwrap();

            prop_assert!(blogs.iter().all(|b| b.likes <= fav.likes));
        }
    }
}
