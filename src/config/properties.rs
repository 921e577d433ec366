//! Property lookup table and post defaults
//!
//! Notion databases do not share a schema, so every canonical post field is
//! resolved from an ordered list of candidate property names.

use serde::{Deserialize, Serialize};

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Candidate property names per canonical field, in lookup order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyMap {
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub category: Vec<String>,
    pub tags: Vec<String>,
    pub published: Vec<String>,
    pub author: Vec<String>,
    pub cover: Vec<String>,
    pub read_time: Vec<String>,
    pub status: Vec<String>,
    pub slug: Vec<String>,
}

impl Default for PropertyMap {
    fn default() -> Self {
        Self {
            title: keys(&["Title", "Name", "title"]),
            description: keys(&["Description", "Summary", "Excerpt"]),
            category: keys(&["Category", "Type"]),
            tags: keys(&["Tags", "Categories"]),
            published: keys(&["Published", "Date", "Created"]),
            author: keys(&["Author", "Creator", "Writer"]),
            cover: keys(&["Cover", "Image"]),
            read_time: keys(&["ReadTime", "Read Time", "Duration"]),
            status: keys(&["Status"]),
            slug: keys(&["Slug"]),
        }
    }
}

/// Values used when no candidate property yields anything
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDefaults {
    pub title: String,
    /// Title used in listings; `{n}` is replaced with the 1-based position
    pub list_title: String,
    pub description: String,
    pub category: String,
    pub author: String,
    pub read_time: u32,
    pub status: String,
    /// Status value (case-insensitive) that marks a post as visible
    pub published_status: String,
}

impl PostDefaults {
    /// Placeholder title for the n-th record of a listing
    pub fn list_title_at(&self, position: usize) -> String {
        self.list_title.replace("{n}", &(position + 1).to_string())
    }
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            list_title: "Untitled Post {n}".to_string(),
            description: String::new(),
            category: "General".to_string(),
            author: "Anonymous".to_string(),
            read_time: 5,
            status: "Published".to_string(),
            published_status: "published".to_string(),
        }
    }
}
