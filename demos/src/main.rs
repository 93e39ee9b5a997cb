//! Quickstart: ingest a few documents and answer a question end to end.
//!
//! Runs entirely on the deterministic mock backends, so no Ollama server is
//! needed. Swap in `OllamaEmbeddingProvider::from_env()` and
//! `OllamaModel::from_env()` to run against live models.

use std::sync::Arc;

use anyhow::Result;
use finwise_chat::{ChatRequest, ChatService};
use finwise_model::MockModel;
use finwise_rag::{
    DocumentMeta, ExtractedDocument, InMemoryVectorIndex, MockEmbeddingProvider, RagConfig,
    RagPipeline,
};

const EMERGENCY_FUND: &str = "An emergency fund is money set aside for surprises such as car repairs or a sudden loss of income. Most advisors suggest holding three to six months of essential expenses.\n\nKeep the fund somewhere you can reach it quickly, and refill it after every withdrawal.";

const BUDGETING: &str = "A budget is a plan for every unit of income. The 50/30/20 rule puts 50 percent of take-home pay toward needs, 30 percent toward wants, and 20 percent toward savings or debt payments.";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = RagConfig::builder().dimension(16).build()?;
    let pipeline = RagPipeline::builder()
        .config(config.clone())
        .embedder(Arc::new(MockEmbeddingProvider::new(config.dimension)))
        .index(Arc::new(InMemoryVectorIndex::new(config.dimension)))
        .build()?;

    let service = ChatService::builder()
        .pipeline(Arc::new(pipeline))
        .model(Arc::new(MockModel::with_response(
            "Aim for three to six months of essential expenses, kept somewhere liquid.",
        )))
        .build()?;

    let documents = vec![
        ExtractedDocument::new(
            EMERGENCY_FUND,
            DocumentMeta::new("emergency_fund.txt", "txt", "demo"),
        ),
        ExtractedDocument::new(BUDGETING, DocumentMeta::new("budgeting.txt", "txt", "demo")),
    ];
    let summary = service.ingest_many(&documents).await;
    println!(
        "Ingested {} documents ({} chunks).",
        summary.documents_processed, summary.total_chunks
    );

    let request = ChatRequest::new("How big should my emergency fund be?", "demo-user");
    let response = service.chat(&request).await?;

    println!("\nQ: {}", request.query);
    println!("A: {}", response.response_text);
    println!(
        "confidence: {:.2} (escalate: {})",
        response.confidence, response.escalate
    );
    for source in &response.sources {
        println!("source: {} (chunk {})", source.file_name, source.chunk_index);
    }

    let health = service.health().await;
    println!(
        "\nhealth: embeddings {} / model {} / {} chunks indexed",
        health.embedding_ok, health.model_ok, health.indexed_chunks
    );

    service.clear_index().await?;
    Ok(())
}
