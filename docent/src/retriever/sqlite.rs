//! SQLite persistence for ingested documentation chunks.
//!
//! The `documents` table holds chunk text, source metadata, and the
//! embedding as a JSON float array. Ingestion writes rows; the bot loads
//! everything into a [`crate::retriever::VectorRetriever`] at startup.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::retriever::vector::IndexedDocument;
use crate::retriever::RetrieverError;

/// SQLite store for embedded documentation chunks.
pub struct SqliteDocumentStore {
    conn: Mutex<Connection>,
}

impl SqliteDocumentStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RetrieverError> {
        let conn = Connection::open(path).map_err(|e| RetrieverError::Storage(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// In-memory database; for tests.
    pub fn open_in_memory() -> Result<Self, RetrieverError> {
        let conn =
            Connection::open_in_memory().map_err(|e| RetrieverError::Storage(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, RetrieverError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                content    TEXT NOT NULL,
                title      TEXT,
                source_url TEXT,
                embedding  TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| RetrieverError::Storage(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, RetrieverError> {
        self.conn
            .lock()
            .map_err(|_| RetrieverError::Storage("connection mutex poisoned".into()))
    }

    /// Inserts one embedded chunk.
    pub fn insert(&self, document: &IndexedDocument) -> Result<(), RetrieverError> {
        let embedding = serde_json::to_string(&document.vector)
            .map_err(|e| RetrieverError::Storage(e.to_string()))?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO documents (content, title, source_url, embedding)
             VALUES (?1, ?2, ?3, ?4)",
            params![document.content, document.title, document.source_url, embedding],
        )
        .map_err(|e| RetrieverError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Loads every chunk with its embedding, insertion order preserved.
    pub fn load_all(&self) -> Result<Vec<IndexedDocument>, RetrieverError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT content, title, source_url, embedding FROM documents ORDER BY id")
            .map_err(|e| RetrieverError::Storage(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|e| RetrieverError::Storage(e.to_string()))?;

        let mut documents = Vec::new();
        for row in rows {
            let (content, title, source_url, embedding) =
                row.map_err(|e| RetrieverError::Storage(e.to_string()))?;
            let vector: Vec<f32> = serde_json::from_str(&embedding)
                .map_err(|e| RetrieverError::Storage(format!("embedding column: {}", e)))?;
            documents.push(IndexedDocument {
                content,
                title,
                source_url,
                vector,
            });
        }
        Ok(documents)
    }

    /// Number of stored chunks.
    pub fn count(&self) -> Result<usize, RetrieverError> {
        let conn = self.lock()?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(|e| RetrieverError::Storage(e.to_string()))?;
        Ok(n as usize)
    }

    /// Removes every stored chunk (re-ingestion from scratch).
    pub fn clear(&self) -> Result<(), RetrieverError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM documents", [])
            .map_err(|e| RetrieverError::Storage(e.to_string()))?;
        Ok(())
    }
}
