//! Notion wire types
//!
//! Records keep their property bag as raw JSON: property names and shapes
//! depend on how each database was set up.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page as returned by the Notion API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub cover: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawRecord {
    /// Create an empty record with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_time: None,
            last_edited_time: None,
            properties: Map::new(),
            cover: None,
            url: None,
        }
    }

    /// Look up a property by its exact name
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// A content block; the type-specific payload sits under the key named by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Block {
    /// Create a block of the given type with its payload
    pub fn new(id: impl Into<String>, kind: impl Into<String>, payload: Value) -> Self {
        let kind = kind.into();
        let mut data = Map::new();
        data.insert(kind.clone(), payload);
        Self {
            id: id.into(),
            kind,
            has_children: false,
            data,
        }
    }

    /// The type-specific payload object
    pub fn payload(&self) -> Option<&Value> {
        self.data.get(&self.kind)
    }
}

/// Database metadata; only used to confirm access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub id: String,
    #[serde(default)]
    pub title: Vec<Value>,
}

impl DatabaseInfo {
    pub fn title(&self) -> String {
        let title: String = self
            .title
            .iter()
            .filter_map(|t| t.get("plain_text").and_then(Value::as_str))
            .collect();
        if title.is_empty() {
            "Untitled Database".to_string()
        } else {
            title
        }
    }
}

/// Sort direction for database queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single sort criterion for a database query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySort {
    pub property: String,
    pub direction: SortDirection,
}

impl QuerySort {
    pub fn descending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Paginated list envelope; only the first page is read
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}
