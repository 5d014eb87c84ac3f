use async_trait::async_trait;
use rusqlite::Connection;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::{NewFeedbackItem, RawFeedbackItem};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Read side of the feedback store: an ordered list of raw rows. No
/// filtering or pagination.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn read_all(&self) -> Result<Vec<RawFeedbackItem>, StoreError>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS feedback (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT NOT NULL,
    source    TEXT NOT NULL,
    upvotes   INTEGER NOT NULL DEFAULT 0,
    timestamp INTEGER NOT NULL
)";

/// SQLite-backed feedback store.
pub struct SqliteFeedbackStore {
    conn: Mutex<Connection>,
}

impl SqliteFeedbackStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        debug!("Feedback store opened - path={}", path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Batch-insert rows, e.g. from a `--seed` file.
    pub async fn insert_batch(&self, items: &[NewFeedbackItem]) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO feedback (title, source, upvotes, timestamp) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for item in items {
                stmt.execute(rusqlite::params![
                    item.title,
                    item.source,
                    item.upvotes,
                    item.timestamp
                ])?;
            }
        }
        tx.commit()?;
        info!("Seeded feedback store - rows={}", items.len());
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for SqliteFeedbackStore {
    async fn read_all(&self) -> Result<Vec<RawFeedbackItem>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare("SELECT id, title, source, upvotes, timestamp FROM feedback ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(RawFeedbackItem {
                id: row.get(0)?,
                title: row.get(1)?,
                source: row.get(2)?,
                upvotes: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?;
        let items = rows.collect::<Result<Vec<_>, _>>()?;
        debug!("Feedback store read - rows={}", items.len());
        Ok(items)
    }
}
