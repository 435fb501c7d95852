use crate::domain::error::AppError;
use crate::domain::traits::KvStore;
use async_trait::async_trait;
use std::io::Cursor;
use std::path::Path;
use tokio_rusqlite::{params, Connection};
use zstd::stream::{decode_all, encode_all};

pub async fn init_database(db_path: &Path) -> Result<Connection, AppError> {
    let db = Connection::open(db_path.to_path_buf()).await?;
    create_schema(&db).await?;
    Ok(db)
}

/// In-memory database, used when nothing should touch the disk
pub async fn init_memory_database() -> Result<Connection, AppError> {
    let db = Connection::open_in_memory().await?;
    create_schema(&db).await?;
    Ok(db)
}

async fn create_schema(db: &Connection) -> Result<(), AppError> {
    db.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                data BLOB NOT NULL,
                compressed_size INTEGER NOT NULL,
                original_size INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )
    })
    .await?;

    Ok(())
}

/// SQLite-backed key/value store. Values are zstd-compressed.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub async fn open(db_path: &Path) -> Result<Self, AppError> {
        Ok(Self::new(init_database(db_path).await?))
    }

    /// Number of keys currently stored
    pub async fn count(&self) -> Result<usize, AppError> {
        let count: i64 = self
            .conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM kv", params![], |row| row.get(0)))
            .await?;
        Ok(count as usize)
    }
}

#[async_trait]
impl KvStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        get_impl(&self.conn, key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        set_impl(&self.conn, key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| conn.execute("DELETE FROM kv WHERE key = ?", params![key]))
            .await?;
        Ok(())
    }
}

async fn get_impl(db: &Connection, key: &str) -> Result<Option<String>, AppError> {
    use rusqlite::OptionalExtension;

    let key = key.to_string();
    let compressed: Option<Vec<u8>> = db
        .call(move |conn| {
            conn.query_row("SELECT data FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()
        })
        .await?;

    let Some(compressed) = compressed else {
        return Ok(None);
    };

    let raw = decode_all(Cursor::new(&compressed))
        .map_err(|e| AppError::Compression(e.to_string()))?;
    let value = String::from_utf8(raw).map_err(|e| AppError::Compression(e.to_string()))?;
    Ok(Some(value))
}

async fn set_impl(db: &Connection, key: &str, value: &str) -> Result<(), AppError> {
    let compressed = encode_all(Cursor::new(value.as_bytes()), 0)
        .map_err(|e| AppError::Compression(e.to_string()))?;
    let now = chrono::Utc::now().timestamp();

    let key = key.to_string();
    let compressed_len = compressed.len();
    let original_len = value.len();

    db.call(move |conn| {
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, data, compressed_size, original_size, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            params![key, compressed, compressed_len, original_len, now],
        )
    })
    .await?;

    Ok(())
}
