//! Ingest command handler.

use clap::Args;
use webrag_core::{config::AppConfig, AppResult};
use webrag_rag::{Extractor, Ingestor};

/// Fetch a web page and store it in the vector store
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// URL of the page to ingest
    pub url: String,

    /// Maximum chunk size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Output the ingest report as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestCommand {
    /// Execute the ingest command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!(url = %self.url, "Executing ingest command");

        let embedder = super::build_embedder(config)?;
        let store = super::connect_store(config).await?;

        let chunk_size = self.chunk_size.unwrap_or(config.chunk_size);
        let ingestor = Ingestor::new(Extractor::new(), embedder, store, chunk_size);

        let report = ingestor.ingest(&self.url).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "Ingested {} ({}/{} chunks stored, {} external / {} internal links)",
                report.url,
                report.chunks_stored,
                report.chunks_total,
                report.external_links,
                report.internal_links
            );
        }

        Ok(())
    }
}
