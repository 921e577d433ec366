//! Blog service - the operations the API and CLI are built on

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::BlogConfig;
use crate::content::{ContentRenderer, Normalizer, Post, PostWithContent};
use crate::error::{BlogError, Result};
use crate::notion::{ContentSource, QuerySort};

/// Reads posts from a content source and turns them into normalized posts
/// and rendered HTML.
pub struct BlogService {
    source: Arc<dyn ContentSource>,
    normalizer: Normalizer,
    renderer: ContentRenderer,
    sort: QuerySort,
    verify_connection: bool,
}

impl BlogService {
    pub fn new(
        source: Arc<dyn ContentSource>,
        normalizer: Normalizer,
        renderer: ContentRenderer,
    ) -> Self {
        Self {
            source,
            normalizer,
            renderer,
            sort: QuerySort::descending("Created"),
            verify_connection: true,
        }
    }

    /// Build a service with normalizer and renderer settings from `config`
    pub fn from_config(source: Arc<dyn ContentSource>, config: &BlogConfig) -> Self {
        Self {
            sort: QuerySort::descending(config.notion.sort_property.clone()),
            verify_connection: config.notion.verify_connection,
            ..Self::new(
                source,
                Normalizer::from_config(config),
                ContentRenderer::new(&config.render),
            )
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Check that the source is reachable and accepts the credentials
    pub async fn test_connection(&self) -> Result<()> {
        match self.source.list_users().await {
            Ok(()) => {
                debug!("Notion connection test successful");
                Ok(())
            }
            Err(e) => {
                warn!("Notion connection test failed: {}", e);
                Err(match e {
                    BlogError::Connection(message) => BlogError::Connection(message),
                    other => BlogError::Connection(other.to_string()),
                })
            }
        }
    }

    async fn ensure_connected(&self) -> Result<()> {
        if self.verify_connection {
            self.test_connection().await?;
        }
        Ok(())
    }

    /// List the published posts of a database, newest first
    pub async fn list_posts(&self, database_id: &str) -> Result<Vec<Post>> {
        self.ensure_connected().await?;

        let database = self.source.retrieve_database(database_id).await?;
        info!("Database access successful: {}", database.title());

        let records = match self
            .source
            .query_database(database_id, Some(&self.sort))
            .await
        {
            Ok(records) => records,
            Err(sort_error @ (BlogError::NotFound(_) | BlogError::AccessDenied(_))) => {
                return Err(sort_error)
            }
            Err(sort_error) => {
                warn!(
                    "Sorted query on '{}' failed, retrying without sort: {}",
                    self.sort.property, sort_error
                );
                self.source
                    .query_database(database_id, None)
                    .await
                    .map_err(|_| sort_error)?
            }
        };

        if records.is_empty() {
            info!("No pages found in database {}", database_id);
            return Ok(Vec::new());
        }

        let posts = self.normalizer.normalize_listing(&records);
        info!(
            "Processed blog posts: {} published out of {} total",
            posts.len(),
            records.len()
        );
        Ok(posts)
    }

    /// Fetch and normalize a single post
    pub async fn get_post(&self, page_id: &str) -> Result<Post> {
        self.ensure_connected().await?;
        debug!("Fetching individual page: {}", page_id);

        let record = self.source.retrieve_page(page_id).await?;
        Ok(self.normalizer.normalize(&record))
    }

    /// Fetch the blocks of a page and render them to HTML
    pub async fn get_post_content(&self, page_id: &str) -> Result<String> {
        self.ensure_connected().await?;
        debug!("Fetching page content for: {}", page_id);

        let blocks = self.source.list_block_children(page_id).await?;
        debug!("Blocks retrieved: {}", blocks.len());

        let content = self.renderer.render(&blocks);
        debug!("Content rendered, length: {}", content.len());
        Ok(content)
    }

    /// Fetch metadata and content together and merge them
    ///
    /// A content failure leaves the content empty. A metadata failure is
    /// tolerated when content was obtained: the post is then rebuilt from
    /// defaults. Without either, the metadata error is returned.
    pub async fn get_post_with_content(&self, page_id: &str) -> Result<PostWithContent> {
        let (content, post) = tokio::join!(self.get_post_content(page_id), self.get_post(page_id));

        let content = content.unwrap_or_else(|e| {
            warn!("Error fetching content for {}: {}", page_id, e);
            String::new()
        });

        let post = match post {
            Ok(post) => post,
            Err(e) if !content.is_empty() => {
                warn!(
                    "Error fetching metadata for {}, using defaults: {}",
                    page_id, e
                );
                Post::from_content(page_id, &content, self.normalizer.defaults())
            }
            Err(e) => return Err(e),
        };

        Ok(PostWithContent { post, content })
    }
}
