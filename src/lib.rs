//! notion-blog: serve blog posts stored in a Notion database
//!
//! Records from a Notion database are normalized into a fixed post shape
//! whatever the database's property names are, and page blocks are rendered
//! to HTML through a pluggable block-renderer registry.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod notion;
pub mod server;
pub mod service;

pub use error::{BlogError, ErrorKind};

use anyhow::{Context, Result};
use std::sync::Arc;

use notion::{ContentSource, HttpNotionClient};
use service::BlogService;

/// The main application
#[derive(Clone)]
pub struct NotionBlog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Post service shared by the CLI and the API server
    pub service: Arc<BlogService>,
}

impl NotionBlog {
    /// Create an instance backed by the Notion API
    pub fn new(config: config::BlogConfig) -> Result<Self> {
        let client = HttpNotionClient::new(config.notion.clone())
            .context("Failed to create Notion client")?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create an instance backed by any content source
    pub fn with_source(config: config::BlogConfig, source: Arc<dyn ContentSource>) -> Self {
        let service = Arc::new(BlogService::from_config(source, &config));
        Self { config, service }
    }

    /// The configured database id
    pub fn database_id(&self) -> Result<&str> {
        self.config
            .notion
            .database_id
            .as_deref()
            .context("NOTION_DATABASE_ID is not set; copy the database ID from the Notion URL")
    }
}
