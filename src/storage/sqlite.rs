//! SQLite implementation of the page store

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{PageStore, StorageResult};
use crate::storage::{PageRecord, PageStatus, StoredPage};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened database
    /// * `Err(StorageError)` - Failed to open or initialize
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_stored_page(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredPage> {
        Ok(StoredPage {
            id: row.get(0)?,
            url: row.get(1)?,
            scraped_at: row.get(2)?,
            title: row.get(3)?,
            content: row.get(4)?,
            h1_tags: row.get(5)?,
            h2_tags: row.get(6)?,
            h3_tags: row.get(7)?,
            meta_description: row.get(8)?,
            meta_keywords: row.get(9)?,
            depth: row.get(10)?,
            retry_count: row.get(11)?,
            status: PageStatus::from_db_string(&row.get::<_, String>(12)?)
                .unwrap_or(PageStatus::Error),
        })
    }
}

const STORED_PAGE_COLUMNS: &str = "id, url, scraped_at, title, content, h1_tags, h2_tags, \
     h3_tags, meta_description, meta_keywords, page_depth, retry_count, status";

impl PageStore for SqliteStore {
    fn truncate_pages(&mut self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM pages", [])?;
        Ok(())
    }

    fn upsert_page(&mut self, record: &PageRecord) -> StorageResult<()> {
        // One transaction per record: a failure here rolls back on drop and
        // leaves every other record untouched.
        let tx = self.conn.transaction()?;
        let now = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO pages (url, scraped_at, title, content, h1_tags, h2_tags, h3_tags,
                                meta_description, meta_keywords, page_depth, retry_count, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(url) DO UPDATE SET
                 scraped_at = excluded.scraped_at,
                 title = excluded.title,
                 content = excluded.content,
                 h1_tags = excluded.h1_tags,
                 h2_tags = excluded.h2_tags,
                 h3_tags = excluded.h3_tags,
                 meta_description = excluded.meta_description,
                 meta_keywords = excluded.meta_keywords,
                 page_depth = excluded.page_depth,
                 retry_count = excluded.retry_count,
                 status = excluded.status",
            params![
                record.url,
                now,
                record.title,
                record.content,
                record.h1_tags,
                record.h2_tags,
                record.h3_tags,
                record.meta_description,
                record.meta_keywords,
                record.depth,
                record.retry_count,
                record.status.to_db_string(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<StoredPage>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pages WHERE url = ?1",
            STORED_PAGE_COLUMNS
        ))?;

        let page = stmt
            .query_row(params![url], Self::row_to_stored_page)
            .optional()?;

        Ok(page)
    }

    fn count_pages(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_pages_by_status(&self, status: PageStatus) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
