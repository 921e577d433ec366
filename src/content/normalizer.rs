//! Post normalizer - maps Notion records onto the canonical post shape

use serde_json::Value;
use std::cmp::Ordering;

use super::property;
use super::Post;
use crate::config::{BlogConfig, PostDefaults, PropertyMap};
use crate::helpers::now_iso;
use crate::notion::RawRecord;

/// Converts records with arbitrary property names into [`Post`]s.
///
/// Every field is resolved through the candidate keys of a [`PropertyMap`];
/// the first candidate that yields a value wins and [`PostDefaults`] fill the
/// rest, so a normalized post never has a missing field.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    properties: PropertyMap,
    defaults: PostDefaults,
}

/// First candidate property for which `extract` yields a value
fn first_present<T, F>(record: &RawRecord, keys: &[String], extract: F) -> Option<T>
where
    F: Fn(&Value) -> Option<T>,
{
    keys.iter()
        .filter_map(|key| record.property(key))
        .find_map(extract)
}

impl Normalizer {
    pub fn new(properties: PropertyMap, defaults: PostDefaults) -> Self {
        Self {
            properties,
            defaults,
        }
    }

    pub fn from_config(config: &BlogConfig) -> Self {
        Self::new(config.properties.clone(), config.defaults.clone())
    }

    pub fn defaults(&self) -> &PostDefaults {
        &self.defaults
    }

    /// Normalize a record fetched on its own
    pub fn normalize(&self, record: &RawRecord) -> Post {
        self.build(record, || self.defaults.title.clone())
    }

    /// Normalize the record at `position` of a listing
    pub fn normalize_at(&self, record: &RawRecord, position: usize) -> Post {
        self.build(record, || self.defaults.list_title_at(position))
    }

    fn build<F>(&self, record: &RawRecord, fallback_title: F) -> Post
    where
        F: FnOnce() -> String,
    {
        let props = &self.properties;
        let defaults = &self.defaults;

        let title = first_present(record, &props.title, property::text)
            .unwrap_or_else(fallback_title);
        let description = first_present(record, &props.description, property::text)
            .unwrap_or_else(|| defaults.description.clone());
        let category = first_present(record, &props.category, property::text)
            .unwrap_or_else(|| defaults.category.clone());
        let tags = first_present(record, &props.tags, property::names).unwrap_or_default();
        let published_date = first_present(record, &props.published, property::text)
            .or_else(|| record.created_time.clone())
            .or_else(|| record.last_edited_time.clone())
            .unwrap_or_else(now_iso);
        let author = first_present(record, &props.author, property::text)
            .unwrap_or_else(|| defaults.author.clone());
        let cover_image = first_present(record, &props.cover, property::file_url)
            .or_else(|| record.cover.as_ref().and_then(property::file_object_url));
        let read_time = first_present(record, &props.read_time, |v| {
            property::number(v)
                .map(f64::round)
                .filter(|n| *n >= 1.0)
                .map(|n| n.min(u32::MAX as f64) as u32)
        })
        .unwrap_or(defaults.read_time);
        let status = first_present(record, &props.status, property::text)
            .unwrap_or_else(|| defaults.status.clone());
        let slug = first_present(record, &props.slug, property::text)
            .unwrap_or_else(|| record.id.clone());

        Post {
            id: record.id.clone(),
            title,
            description,
            category,
            tags,
            published_date,
            status,
            author,
            cover_image,
            read_time,
            slug,
        }
    }

    /// Whether a post is visible in listings
    ///
    /// Posts with an empty status or the published status (any case) are kept.
    pub fn is_listed(&self, post: &Post) -> bool {
        let status = post.status.trim();
        status.is_empty() || status.eq_ignore_ascii_case(self.defaults.published_status.trim())
    }

    /// Normalize a listing: convert, drop unpublished posts, newest first
    pub fn normalize_listing(&self, records: &[RawRecord]) -> Vec<Post> {
        let mut posts: Vec<Post> = records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                tracing::debug!(
                    "Processing page {}: {} (properties: {:?})",
                    position + 1,
                    record.id,
                    record.properties.keys().collect::<Vec<_>>()
                );
                self.normalize_at(record, position)
            })
            .filter(|post| self.is_listed(post))
            .collect();

        sort_by_date_desc(&mut posts);
        posts
    }
}

/// Sort newest first; posts without a parseable date go last, ties keep order
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| match (a.published_at(), b.published_at()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    fn full_record() -> RawRecord {
        record(json!({
            "id": "page-1",
            "created_time": "2024-01-01T08:00:00.000Z",
            "cover": { "type": "external", "external": { "url": "https://cdn/page-cover.png" } },
            "properties": {
                "Name": { "type": "title", "title": [{ "plain_text": "Ownership in Rust" }] },
                "Summary": { "type": "rich_text", "rich_text": [{ "plain_text": "Borrowing, explained." }] },
                "Category": { "type": "select", "select": { "name": "Programming" } },
                "Tags": { "type": "multi_select", "multi_select": [{ "name": "rust" }, { "name": "memory" }] },
                "Published": { "type": "date", "date": { "start": "2024-03-05" } },
                "Author": { "type": "people", "people": [{ "name": "Ferris" }] },
                "Cover": { "type": "files", "files": [{ "file": { "url": "https://s3/cover.png" } }] },
                "ReadTime": { "type": "number", "number": 12 },
                "Status": { "type": "select", "select": { "name": "Published" } },
                "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "ownership-in-rust" }] }
            }
        }))
    }

    #[test]
    fn test_all_fields_round_trip() {
        let post = Normalizer::default().normalize(&full_record());
        assert_eq!(post.id, "page-1");
        assert_eq!(post.title, "Ownership in Rust");
        assert_eq!(post.description, "Borrowing, explained.");
        assert_eq!(post.category, "Programming");
        assert_eq!(post.tags, vec!["rust", "memory"]);
        assert_eq!(post.published_date, "2024-03-05");
        assert_eq!(post.author, "Ferris");
        assert_eq!(post.cover_image.as_deref(), Some("https://s3/cover.png"));
        assert_eq!(post.read_time, 12);
        assert_eq!(post.status, "Published");
        assert_eq!(post.slug, "ownership-in-rust");
    }

    #[test]
    fn test_empty_record_uses_defaults() {
        let post = Normalizer::default().normalize(&record(json!({
            "id": "page-2",
            "created_time": "2024-02-01T00:00:00.000Z"
        })));
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.description, "");
        assert_eq!(post.category, "General");
        assert!(post.tags.is_empty());
        assert_eq!(post.published_date, "2024-02-01T00:00:00.000Z");
        assert_eq!(post.author, "Anonymous");
        assert_eq!(post.cover_image, None);
        assert_eq!(post.read_time, 5);
        assert_eq!(post.status, "Published");
        assert_eq!(post.slug, "page-2");
    }

    #[test]
    fn test_missing_title_is_never_empty() {
        let normalizer = Normalizer::default();
        let blank = record(json!({
            "id": "p",
            "properties": {
                "Title": { "type": "title", "title": [] },
                "Name": { "type": "title", "title": [{ "plain_text": "   " }] }
            }
        }));
        assert_eq!(normalizer.normalize(&blank).title, "Untitled");
        assert_eq!(normalizer.normalize_at(&blank, 2).title, "Untitled Post 3");
    }

    #[test]
    fn test_candidate_order() {
        let post = Normalizer::default().normalize(&record(json!({
            "id": "p",
            "properties": {
                "Title": { "type": "title", "title": [] },
                "title": { "type": "title", "title": [{ "plain_text": "lowercase" }] },
                "Name": { "type": "title", "title": [{ "plain_text": "from name" }] },
                "Excerpt": { "type": "rich_text", "rich_text": [{ "plain_text": "excerpt" }] },
                "Type": { "type": "select", "select": { "name": "Notes" } },
                "Writer": { "type": "people", "people": [{ "name": "W" }] }
            }
        })));
        assert_eq!(post.title, "from name");
        assert_eq!(post.description, "excerpt");
        assert_eq!(post.category, "Notes");
        assert_eq!(post.author, "W");
    }

    #[test]
    fn test_date_fallback_chain() {
        let normalizer = Normalizer::default();
        let with_date = record(json!({
            "id": "p",
            "created_time": "2024-01-01T00:00:00.000Z",
            "properties": {
                "Date": { "type": "date", "date": { "start": "2023-12-24" } }
            }
        }));
        assert_eq!(normalizer.normalize(&with_date).published_date, "2023-12-24");

        let with_created = record(json!({
            "id": "p",
            "created_time": "2024-01-01T00:00:00.000Z",
            "properties": {
                "Published": { "type": "date", "date": null },
                "Created": { "type": "created_time", "created_time": "2023-06-01T10:00:00.000Z" }
            }
        }));
        assert_eq!(
            normalizer.normalize(&with_created).published_date,
            "2023-06-01T10:00:00.000Z"
        );
    }

    #[test]
    fn test_cover_fallback_chain() {
        let normalizer = Normalizer::default();
        let image_prop = record(json!({
            "id": "p",
            "cover": { "type": "file", "file": { "url": "https://s3/page.png" } },
            "properties": {
                "Cover": { "type": "files", "files": [] },
                "Image": { "type": "files", "files": [{ "external": { "url": "https://cdn/image.png" } }] }
            }
        }));
        assert_eq!(
            normalizer.normalize(&image_prop).cover_image.as_deref(),
            Some("https://cdn/image.png")
        );

        let page_cover = record(json!({
            "id": "p",
            "cover": { "type": "file", "file": { "url": "https://s3/page.png" } }
        }));
        assert_eq!(
            normalizer.normalize(&page_cover).cover_image.as_deref(),
            Some("https://s3/page.png")
        );
    }

    #[test]
    fn test_read_time_must_be_positive() {
        let post = Normalizer::default().normalize(&record(json!({
            "id": "p",
            "properties": {
                "ReadTime": { "type": "number", "number": 0 },
                "Read Time": { "type": "number", "number": 3.4 }
            }
        })));
        assert_eq!(post.read_time, 3);
    }

    #[test]
    fn test_status_inclusion() {
        let normalizer = Normalizer::default();
        let mut post = Post::new("p");
        for status in ["Published", "published", "PUBLISHED", "", "  "] {
            post.status = status.to_string();
            assert!(normalizer.is_listed(&post), "{:?} should be listed", status);
        }
        for status in ["Draft", "Archived", "Published soon"] {
            post.status = status.to_string();
            assert!(!normalizer.is_listed(&post), "{:?} should be hidden", status);
        }
    }

    #[test]
    fn test_missing_status_property_is_listed() {
        let normalizer = Normalizer::default();
        let post = normalizer.normalize(&record(json!({ "id": "p" })));
        assert!(normalizer.is_listed(&post));
    }

    #[test]
    fn test_custom_property_map() {
        let properties = PropertyMap {
            title: vec!["Headline".to_string()],
            ..PropertyMap::default()
        };
        let normalizer = Normalizer::new(properties, PostDefaults::default());
        let post = normalizer.normalize(&record(json!({
            "id": "p",
            "properties": {
                "Title": { "type": "title", "title": [{ "plain_text": "ignored" }] },
                "Headline": { "type": "title", "title": [{ "plain_text": "Custom" }] }
            }
        })));
        assert_eq!(post.title, "Custom");
    }

    #[test]
    fn test_listing_filters_and_sorts() {
        let records = vec![
            record(json!({
                "id": "old",
                "created_time": "2023-01-01T00:00:00.000Z",
                "properties": { "Title": { "type": "title", "title": [{ "plain_text": "Old" }] } }
            })),
            record(json!({
                "id": "draft",
                "created_time": "2024-06-01T00:00:00.000Z",
                "properties": { "Status": { "type": "select", "select": { "name": "Draft" } } }
            })),
            record(json!({
                "id": "new",
                "created_time": "2024-05-01T00:00:00.000Z"
            })),
        ];
        let posts = Normalizer::default().normalize_listing(&records);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(posts[0].title, "Untitled Post 3");
    }

    #[test]
    fn test_sort_puts_unparseable_dates_last() {
        let mut a = Post::new("a");
        a.published_date = "someday".to_string();
        let mut b = Post::new("b");
        b.published_date = "2020-01-01".to_string();
        let mut posts = vec![a, b];
        sort_by_date_desc(&mut posts);
        assert_eq!(posts[0].id, "b");
    }
}
