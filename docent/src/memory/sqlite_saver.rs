//! SQLite checkpointer (SqliteSaver).
//!
//! Persists checkpoints in a `checkpoints` table, state serialized as JSON.
//! One writer at a time; the connection sits behind a mutex and every
//! operation is a single short statement.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::memory::checkpoint::Checkpoint;
use crate::memory::checkpointer::{thread_key, CheckpointError, Checkpointer};
use crate::memory::config::RunnableConfig;

/// SQLite-backed checkpointer for states that serialize via serde.
///
/// **Interaction**: Used as `Arc<dyn Checkpointer<S>>` in
/// `StateGraph::compile_with_checkpointer`; the telegram-bot binary opens
/// one per deployment database.
pub struct SqliteSaver {
    conn: Mutex<Connection>,
}

impl SqliteSaver {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        let conn =
            Connection::open(path).map_err(|e| CheckpointError::Storage(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// In-memory database; for tests.
    pub fn open_in_memory() -> Result<Self, CheckpointError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CheckpointError::Storage(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, CheckpointError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS checkpoints (
                rowid_seq     INTEGER PRIMARY KEY AUTOINCREMENT,
                thread_key    TEXT NOT NULL,
                checkpoint_id TEXT NOT NULL,
                ts            TEXT NOT NULL,
                step          INTEGER NOT NULL,
                state         TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| CheckpointError::Storage(e.to_string()))?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_checkpoints_thread
             ON checkpoints (thread_key, rowid_seq)",
            [],
        )
        .map_err(|e| CheckpointError::Storage(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CheckpointError> {
        self.conn
            .lock()
            .map_err(|_| CheckpointError::Storage("connection mutex poisoned".into()))
    }
}

#[async_trait]
impl<S> Checkpointer<S> for SqliteSaver
where
    S: Clone + Send + Sync + Serialize + DeserializeOwned + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let key = thread_key(config)?;
        let state_json = serde_json::to_string(&checkpoint.state)
            .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO checkpoints (thread_key, checkpoint_id, ts, step, state)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![key, checkpoint.id, checkpoint.ts, checkpoint.step, state_json],
        )
        .map_err(|e| CheckpointError::Storage(e.to_string()))?;
        Ok(checkpoint.id.clone())
    }

    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let key = thread_key(config)?;
        let conn = self.lock()?;
        let row: Option<(String, String, i64, String)> = conn
            .query_row(
                "SELECT checkpoint_id, ts, step, state FROM checkpoints
                 WHERE thread_key = ?1 ORDER BY rowid_seq DESC LIMIT 1",
                params![key],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| CheckpointError::Storage(e.to_string()))?;

        match row {
            None => Ok(None),
            Some((id, ts, step, state_json)) => {
                let state: S = serde_json::from_str(&state_json)
                    .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
                Ok(Some(Checkpoint { id, ts, state, step }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Snap {
        counter: u32,
        note: String,
    }

    /// **Scenario**: put/get round-trips through SQLite and returns the latest.
    #[tokio::test]
    async fn put_then_get_roundtrips_latest() {
        let saver = SqliteSaver::open_in_memory().unwrap();
        let config = RunnableConfig::for_thread("chat-42");

        let first = Checkpoint::from_state(
            Snap {
                counter: 1,
                note: "first".into(),
            },
            3,
        );
        let second = Checkpoint::from_state(
            Snap {
                counter: 2,
                note: "second".into(),
            },
            4,
        );
        saver.put(&config, &first).await.unwrap();
        saver.put(&config, &second).await.unwrap();

        let loaded: Checkpoint<Snap> = saver.get(&config).await.unwrap().expect("latest");
        assert_eq!(loaded.state.counter, 2);
        assert_eq!(loaded.state.note, "second");
        assert_eq!(loaded.step, 4);
        assert_eq!(loaded.id, second.id);
    }

    /// **Scenario**: a fresh thread has no checkpoint.
    #[tokio::test]
    async fn fresh_thread_returns_none() {
        let saver = SqliteSaver::open_in_memory().unwrap();
        let config = RunnableConfig::for_thread("nobody");
        let loaded: Option<Checkpoint<Snap>> = saver.get(&config).await.unwrap();
        assert!(loaded.is_none());
    }

    /// **Scenario**: the schema persists across reopen on disk.
    #[tokio::test]
    async fn reopen_preserves_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoints.db");
        let config = RunnableConfig::for_thread("t1");

        {
            let saver = SqliteSaver::open(&path).unwrap();
            saver
                .put(
                    &config,
                    &Checkpoint::from_state(
                        Snap {
                            counter: 7,
                            note: "persisted".into(),
                        },
                        1,
                    ),
                )
                .await
                .unwrap();
        }

        let saver = SqliteSaver::open(&path).unwrap();
        let loaded: Checkpoint<Snap> = saver.get(&config).await.unwrap().expect("persisted");
        assert_eq!(loaded.state.counter, 7);
    }
}
