//! The content source abstraction

use async_trait::async_trait;

use super::types::{Block, DatabaseInfo, QuerySort, RawRecord};
use crate::error::Result;

/// Read-only access to a Notion-like content source.
///
/// Implementations map source error codes onto [`crate::BlogError`] so that
/// not-found and access-denied failures stay distinguishable.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Cheap request used to check that the source is reachable and the
    /// credentials are accepted.
    async fn list_users(&self) -> Result<()>;

    /// Retrieve database metadata.
    async fn retrieve_database(&self, database_id: &str) -> Result<DatabaseInfo>;

    /// Query the records of a database, optionally sorted server-side.
    async fn query_database(
        &self,
        database_id: &str,
        sort: Option<&QuerySort>,
    ) -> Result<Vec<RawRecord>>;

    /// Retrieve a single record.
    async fn retrieve_page(&self, page_id: &str) -> Result<RawRecord>;

    /// List the direct children of a block or page. Nested children are not
    /// expanded.
    async fn list_block_children(&self, block_id: &str) -> Result<Vec<Block>>;
}
