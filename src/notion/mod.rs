//! Notion content source: API client, wire types and a test double

mod client;
pub mod mock;
mod source;
mod types;

pub use client::HttpNotionClient;
pub use mock::MockSource;
pub use source::ContentSource;
pub use types::{Block, DatabaseInfo, QuerySort, RawRecord, SortDirection};
