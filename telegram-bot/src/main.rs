//! Telegram transport for the docent workflow.
//!
//! Long-polling bot: each incoming text message is one workflow run, keyed
//! by the chat id as the thread id. Answers longer than the Telegram limit
//! are sent as multiple messages.

mod chunk;

use std::sync::Arc;

use anyhow::Context;
use teloxide::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::Settings;
use docent::llm::ChatOpenAI;
use docent::memory::SqliteSaver;
use docent::notify::SlackNotifier;
use docent::retriever::{OpenAiEmbedder, SqliteDocumentStore, VectorRetriever, DEFAULT_EMBEDDING_DIMENSION};
use docent::workflow::{Capabilities, Chatbot};

use chunk::{chunk_message, TELEGRAM_MESSAGE_LIMIT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_and_apply(None)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env();
    let token = settings
        .telegram_bot_token
        .clone()
        .context("TELEGRAM_BOT_TOKEN is required")?;

    let chatbot = Arc::new(build_chatbot(&settings)?);

    info!(db = %settings.database_path.display(), "starting telegram bot");
    let bot = Bot::new(token);
    Dispatcher::builder(bot, Update::filter_message().endpoint(on_message))
        .dependencies(dptree::deps![chatbot])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

fn build_chatbot(settings: &Settings) -> anyhow::Result<Chatbot> {
    let store = SqliteDocumentStore::open(&settings.database_path)?;
    let documents = store.load_all()?;
    if documents.is_empty() {
        warn!("document store is empty; run the ingest command first");
    } else {
        info!(chunks = documents.len(), "document index loaded");
    }

    let embedder = Arc::new(OpenAiEmbedder::new(
        settings.embedding_model.clone(),
        DEFAULT_EMBEDDING_DIMENSION,
    ));
    let chatbot = Chatbot::new(
        Capabilities {
            llm: Arc::new(ChatOpenAI::new(settings.chat_model.clone())),
            retriever: Arc::new(VectorRetriever::with_documents(embedder, documents)),
            notifier: Arc::new(SlackNotifier::new(settings.slack_webhook_url.clone())),
            checkpointer: Arc::new(SqliteSaver::open(&settings.database_path)?),
        },
        settings.top_k,
    )?;
    Ok(chatbot)
}

async fn on_message(
    bot: Bot,
    msg: Message,
    chatbot: Arc<Chatbot>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let thread_id = msg.chat.id.to_string();

    let answer = match chatbot.respond(&thread_id, text).await {
        Ok(answer) if !answer.is_empty() => answer,
        Ok(_) => "Sorry, I don't have an answer for that right now.".to_string(),
        Err(e) => {
            error!(thread = %thread_id, error = %e, "workflow run failed");
            "Sorry, something went wrong. Please try again.".to_string()
        }
    };

    for part in chunk_message(&answer, TELEGRAM_MESSAGE_LIMIT) {
        bot.send_message(msg.chat.id, part).await?;
    }
    Ok(())
}
