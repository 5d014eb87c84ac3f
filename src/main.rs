use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use feedback_triage::classifier::OllamaClassifier;
use feedback_triage::engine::TriageEngine;
use feedback_triage::models::NewFeedbackItem;
use feedback_triage::server::api_router;
use feedback_triage::store::SqliteFeedbackStore;

/// Feedback triage - ranks raw feedback into deduplicated issues by urgency
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to bind the API server
    #[arg(short, long, default_value = "127.0.0.1:8787")]
    addr: String,

    /// Path to the SQLite feedback database
    #[arg(short, long, default_value = "feedback.db")]
    db: String,

    /// Base URL of the classifier endpoint (overrides TRIAGE_LLM_URL)
    #[arg(long)]
    llm_url: Option<String>,

    /// Classifier model name (overrides TRIAGE_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Classifier request timeout in seconds
    #[arg(long, default_value_t = 60)]
    llm_timeout: u64,

    /// JSON file of feedback rows to insert into the store before serving
    #[arg(long)]
    seed: Option<String>,
}

fn resolve_llm(args: &Args) -> (String, String) {
    // CLI arg > env var > default, for both knobs
    let url = args
        .llm_url
        .clone()
        .or_else(|| std::env::var("TRIAGE_LLM_URL").ok())
        .unwrap_or_else(|| "http://localhost:11434".to_string());
    let model = args
        .model
        .clone()
        .or_else(|| std::env::var("TRIAGE_MODEL").ok())
        .unwrap_or_else(|| "llama3:8b".to_string());
    (url, model)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting feedback_triage");

    let args = Args::parse();
    let (llm_url, model) = resolve_llm(&args);
    debug!("Classifier endpoint - url={}, model={}", llm_url, model);

    let store = SqliteFeedbackStore::open(&args.db)?;

    if let Some(ref seed_path) = args.seed {
        let raw = std::fs::read_to_string(seed_path)?;
        let rows: Vec<NewFeedbackItem> = serde_json::from_str(&raw)?;
        info!("Seeding store - file={}, rows={}", seed_path, rows.len());
        store.insert_batch(&rows).await?;
    }

    let classifier = OllamaClassifier::new(&llm_url, &model, args.llm_timeout)?;
    let engine = Arc::new(TriageEngine::new(Arc::new(store), Arc::new(classifier)));

    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    info!("API server listening - addr={}, db={}", args.addr, args.db);
    axum::serve(listener, api_router(engine)).await?;

    Ok(())
}
