//! Checkpoint snapshot type.
//!
//! One checkpoint is the full conversation state after one run, plus enough
//! metadata to order snapshots within a thread.

use std::time::SystemTime;

use uuid::Uuid;

/// One checkpoint: state snapshot + id/ts/step.
///
/// Stored by a [`crate::memory::Checkpointer`] keyed by
/// `(thread_id, checkpoint_ns)`; the newest checkpoint per thread is the
/// thread's current state.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    /// Unique id of this checkpoint.
    pub id: String,
    /// Milliseconds since epoch at creation time.
    pub ts: String,
    /// The conversation state at the time of the checkpoint.
    pub state: S,
    /// Number of node executions in the run that produced this snapshot.
    pub step: i64,
}

impl<S> Checkpoint<S> {
    /// Creates a checkpoint from the state after a run.
    pub fn from_state(state: S, step: i64) -> Self {
        let ts = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
            .to_string();
        Self {
            id: Uuid::new_v4().to_string(),
            ts,
            state,
            step,
        }
    }
}
