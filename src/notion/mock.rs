//! In-memory content source for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use super::source::ContentSource;
use super::types::{Block, DatabaseInfo, QuerySort, RawRecord};
use crate::error::{BlogError, Result};

/// Mock source with canned databases, pages and block lists.
///
/// Unknown ids yield [`BlogError::NotFound`].
#[derive(Default)]
pub struct MockSource {
    databases: HashMap<String, Vec<RawRecord>>,
    pages: HashMap<String, RawRecord>,
    blocks: HashMap<String, Vec<Block>>,
    failures: HashMap<String, BlogError>,
    connection_error: Option<BlogError>,
    reject_sort: Option<BlogError>,
    queries: Mutex<Vec<Option<QuerySort>>>,
    call_count: AtomicU32,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a database; its records are also retrievable as pages
    pub fn with_database(mut self, database_id: &str, records: Vec<RawRecord>) -> Self {
        for record in &records {
            self.pages.insert(record.id.clone(), record.clone());
        }
        self.databases.insert(database_id.to_string(), records);
        self
    }

    pub fn with_page(mut self, record: RawRecord) -> Self {
        self.pages.insert(record.id.clone(), record);
        self
    }

    pub fn with_blocks(mut self, page_id: &str, blocks: Vec<Block>) -> Self {
        self.blocks.insert(page_id.to_string(), blocks);
        self
    }

    /// Make every lookup of `id` fail with `error`
    pub fn with_failure(mut self, id: &str, error: BlogError) -> Self {
        self.failures.insert(id.to_string(), error);
        self
    }

    /// Make the connection probe fail
    pub fn with_connection_error(mut self, error: BlogError) -> Self {
        self.connection_error = Some(error);
        self
    }

    /// Reject sorted queries with `error`
    pub fn rejecting_sort(mut self, error: BlogError) -> Self {
        self.reject_sort = Some(error);
        self
    }

    /// Sort arguments of every query received, in order
    pub fn queries(&self) -> Vec<Option<QuerySort>> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Total number of calls made against this source
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    fn check(&self, id: &str) -> Result<()> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.failures.get(id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn list_users(&self) -> Result<()> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.connection_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn retrieve_database(&self, database_id: &str) -> Result<DatabaseInfo> {
        self.check(database_id)?;
        if !self.databases.contains_key(database_id) {
            return Err(BlogError::NotFound(format!(
                "Could not find database with ID: {}.",
                database_id
            )));
        }
        Ok(DatabaseInfo {
            id: database_id.to_string(),
            title: Vec::new(),
        })
    }

    async fn query_database(
        &self,
        database_id: &str,
        sort: Option<&QuerySort>,
    ) -> Result<Vec<RawRecord>> {
        self.check(database_id)?;
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(sort.cloned());
        }
        if let (Some(err), Some(_)) = (&self.reject_sort, sort) {
            return Err(err.clone());
        }
        self.databases.get(database_id).cloned().ok_or_else(|| {
            BlogError::NotFound(format!("Could not find database with ID: {}.", database_id))
        })
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<RawRecord> {
        self.check(page_id)?;
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| BlogError::NotFound(format!("Could not find page with ID: {}.", page_id)))
    }

    async fn list_block_children(&self, block_id: &str) -> Result<Vec<Block>> {
        self.check(block_id)?;
        self.blocks
            .get(block_id)
            .cloned()
            .ok_or_else(|| BlogError::NotFound(format!("Could not find block with ID: {}.", block_id)))
    }
}
