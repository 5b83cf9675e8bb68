//! Typed settings read from the process environment.

use std::path::PathBuf;

/// Deployment settings for the docent binaries.
///
/// Read from the environment after [`crate::load_and_apply`]; every field
/// has a default or is optional, so a partial environment still yields a
/// usable value and each binary checks the keys it actually needs.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `TELEGRAM_BOT_TOKEN` - required by the telegram-bot binary.
    pub telegram_bot_token: Option<String>,
    /// `OPENAI_API_KEY` - required for real LLM and embedding calls.
    pub openai_api_key: Option<String>,
    /// `SLACK_WEBHOOK_URL` - lead notifications are skipped (logged) without it.
    pub slack_webhook_url: Option<String>,
    /// `DOCENT_DB` - SQLite file for documents and checkpoints.
    pub database_path: PathBuf,
    /// `DOCENT_CHAT_MODEL` - chat completion model name.
    pub chat_model: String,
    /// `DOCENT_EMBEDDING_MODEL` - embedding model name.
    pub embedding_model: String,
    /// `DOCENT_TOP_K` - documents retrieved per answer.
    pub top_k: usize,
}

const DEFAULT_DATABASE_PATH: &str = "docent.db";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_TOP_K: usize = 5;

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    /// Reads settings from the current process environment.
    pub fn from_env() -> Self {
        Self {
            telegram_bot_token: non_empty("TELEGRAM_BOT_TOKEN"),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            slack_webhook_url: non_empty("SLACK_WEBHOOK_URL"),
            database_path: non_empty("DOCENT_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            chat_model: non_empty("DOCENT_CHAT_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: non_empty("DOCENT_EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            top_k: non_empty("DOCENT_TOP_K")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOP_K),
        }
    }
}
