//! Storage trait and error types

use crate::storage::{PageRecord, PageStatus, StoredPage};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for the page persistence sink.
///
/// Implementations persist terminal page records keyed by normalized URL.
/// Each write must be its own transaction so that one failed write cannot
/// corrupt or block subsequent writes.
pub trait PageStore {
    /// Deletes all page rows, resetting prior crawl state.
    ///
    /// Called once at run start.
    fn truncate_pages(&mut self) -> StorageResult<()>;

    /// Inserts or updates a page record, keyed by its normalized URL.
    ///
    /// Last write wins on every mutable field; the scrape timestamp is
    /// refreshed on each write.
    fn upsert_page(&mut self, record: &PageRecord) -> StorageResult<()>;

    /// Gets a stored page by normalized URL
    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<StoredPage>>;

    /// Total number of stored pages
    fn count_pages(&self) -> StorageResult<u64>;

    /// Number of stored pages with the given status
    fn count_pages_by_status(&self, status: PageStatus) -> StorageResult<u64>;
}
