//! Operational CLI: ingest documentation into the vector store and ask
//! one-shot questions through the full workflow.

mod ingest;
mod splitter;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Settings;
use docent::llm::ChatOpenAI;
use docent::memory::MemorySaver;
use docent::notify::SlackNotifier;
use docent::retriever::{
    Embedder, IndexedDocument, OpenAiEmbedder, SqliteDocumentStore, VectorRetriever,
    DEFAULT_EMBEDDING_DIMENSION,
};
use docent::workflow::{Capabilities, Chatbot};

use ingest::{fetch_page, fetch_sitemap_urls};
use splitter::split_text;

#[derive(Parser)]
#[command(name = "docent", about = "Documentation FAQ bot operations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch documentation, chunk and embed it, and store it for retrieval.
    Ingest {
        /// Sitemap URL to expand into page URLs.
        #[arg(long)]
        sitemap: Option<String>,
        /// Explicit page URLs (repeatable).
        #[arg(long = "url")]
        urls: Vec<String>,
        /// Chunk size in characters.
        #[arg(long, default_value_t = 1200)]
        chunk_size: usize,
        /// Overlap between consecutive chunks, in characters.
        #[arg(long, default_value_t = 200)]
        overlap: usize,
        /// Drop previously ingested chunks first.
        #[arg(long)]
        fresh: bool,
    },
    /// Ask one question through the full workflow and print the answer.
    Ask {
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_and_apply(None)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env();
    match Cli::parse().command {
        Command::Ingest {
            sitemap,
            urls,
            chunk_size,
            overlap,
            fresh,
        } => run_ingest(&settings, sitemap, urls, chunk_size, overlap, fresh).await,
        Command::Ask { question } => run_ask(&settings, &question).await,
    }
}

async fn run_ingest(
    settings: &Settings,
    sitemap: Option<String>,
    mut urls: Vec<String>,
    chunk_size: usize,
    overlap: usize,
    fresh: bool,
) -> anyhow::Result<()> {
    let http = reqwest::Client::new();
    if let Some(sitemap_url) = sitemap {
        urls.extend(fetch_sitemap_urls(&http, &sitemap_url).await?);
    }
    anyhow::ensure!(
        !urls.is_empty(),
        "nothing to ingest: pass --sitemap or at least one --url"
    );

    let store = SqliteDocumentStore::open(&settings.database_path)?;
    if fresh {
        store.clear()?;
    }
    let embedder = OpenAiEmbedder::new(
        settings.embedding_model.clone(),
        DEFAULT_EMBEDDING_DIMENSION,
    );

    let mut total_chunks = 0usize;
    for url in &urls {
        let page = match fetch_page(&http, url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "skipping page");
                continue;
            }
        };
        let chunks = split_text(&page.text, chunk_size, overlap);
        if chunks.is_empty() {
            warn!(url = %url, "page had no extractable text");
            continue;
        }
        let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let vectors = embedder.embed(&refs).await?;
        for (content, vector) in chunks.into_iter().zip(vectors) {
            store.insert(&IndexedDocument {
                content,
                title: page.title.clone(),
                source_url: Some(page.url.clone()),
                vector,
            })?;
            total_chunks += 1;
        }
        info!(url = %url, "page ingested");
    }

    info!(
        pages = urls.len(),
        chunks = total_chunks,
        db = %settings.database_path.display(),
        "ingestion finished"
    );
    Ok(())
}

async fn run_ask(settings: &Settings, question: &str) -> anyhow::Result<()> {
    let store = SqliteDocumentStore::open(&settings.database_path)?;
    let documents = store.load_all()?;
    if documents.is_empty() {
        warn!("document store is empty; answers will lack context");
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
            checkpointer: Arc::new(MemorySaver::new()),
        },
        settings.top_k,
    )?;

    let answer = chatbot
        .respond("cli", question)
        .await
        .context("workflow run")?;
    println!("{}", answer);
    Ok(())
}
