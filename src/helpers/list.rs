//! List helpers: filtering posts and counting tags and categories

use serde::Deserialize;
use std::collections::HashMap;

use crate::content::Post;

/// Category value that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Filter applied to a post listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostFilter {
    /// Exact category to keep; `All` or empty keeps every category
    pub category: Option<String>,
    /// Case-insensitive search over title, description and tags
    #[serde(alias = "search")]
    pub q: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category) = self.category.as_deref().map(str::trim) {
            if !category.is_empty() && category != ALL_CATEGORIES && post.category != category {
                return false;
            }
        }

        match self.q.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                post.title.to_lowercase().contains(&term)
                    || post.description.to_lowercase().contains(&term)
                    || post.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }

    /// Keep the posts matching this filter, preserving order
    pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
        posts.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Tag usage counts, most used first, ties by name
pub fn count_tags(posts: &[Post]) -> Vec<(String, usize)> {
    let mut tags: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    sorted_counts(tags)
}

/// Category usage counts, most used first, ties by name
pub fn count_categories(posts: &[Post]) -> Vec<(String, usize)> {
    let mut categories: HashMap<String, usize> = HashMap::new();
    for post in posts {
        *categories.entry(post.category.clone()).or_insert(0) += 1;
    }
    sorted_counts(categories)
}

fn sorted_counts(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
