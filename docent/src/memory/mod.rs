//! Checkpoint persistence for conversation threads.
//!
//! A [`Checkpointer`] saves and loads state snapshots keyed by
//! `(thread_id, checkpoint_ns)`. The workflow loads the latest checkpoint
//! before each run and the compiled graph saves one after.
//!
//! Implementations: [`MemorySaver`] (in-memory, dev and tests) and
//! [`SqliteSaver`] (rusqlite, bundled).

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;
mod sqlite_saver;

pub use checkpoint::Checkpoint;
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;
pub use sqlite_saver::SqliteSaver;
