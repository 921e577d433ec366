//! Post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PostDefaults;
use crate::helpers::{estimate_read_time, now_iso, parse_date};

/// Title used when a post is rebuilt from content alone
pub const FALLBACK_TITLE: &str = "Blog Post";

/// Description used when a post is rebuilt from content alone
pub const FALLBACK_DESCRIPTION: &str = "A blog post from Notion";

/// A normalized blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Notion page id
    pub id: String,

    /// Post title, never empty
    pub title: String,

    /// Short summary, may be empty
    pub description: String,

    pub category: String,

    pub tags: Vec<String>,

    /// ISO-8601 date or timestamp, as stored in Notion
    pub published_date: String,

    /// Workflow status; only used to decide visibility in listings
    pub status: String,

    pub author: String,

    /// Cover image URL
    pub cover_image: Option<String>,

    /// Reading time in minutes
    pub read_time: u32,

    /// URL-friendly name, falls back to the id
    pub slug: String,
}

impl Post {
    /// Create a post with default values for everything but the id
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_defaults(id, &PostDefaults::default())
    }

    /// Create a post filled from the given defaults
    pub fn with_defaults(id: impl Into<String>, defaults: &PostDefaults) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            title: defaults.title.clone(),
            description: defaults.description.clone(),
            category: defaults.category.clone(),
            tags: Vec::new(),
            published_date: now_iso(),
            status: defaults.status.clone(),
            author: defaults.author.clone(),
            cover_image: None,
            read_time: defaults.read_time,
        }
    }

    /// Minimal post for a page whose metadata could not be fetched
    pub fn from_content(id: impl Into<String>, content: &str, defaults: &PostDefaults) -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            read_time: estimate_read_time(content),
            ..Self::with_defaults(id, defaults)
        }
    }

    /// Parsed publication date, if the stored value is a valid date
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.published_date)
    }
}

/// A post merged with its rendered body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithContent {
    #[serde(flatten)]
    pub post: Post,

    /// Rendered HTML
    pub content: String,
}
