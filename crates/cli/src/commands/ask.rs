//! Ask command handler.

use clap::Args;
use webrag_core::{config::AppConfig, AppResult};
use webrag_llm::create_client;
use webrag_rag::{Answerer, DEFAULT_TOP_K};

/// Ask a question against the ingested pages
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Number of records to retrieve as context
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Output the answer as JSON with sources
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let embedder = super::build_embedder(config)?;

        let api_key = if config.provider == "openai" {
            Some(config.require_api_key()?)
        } else {
            None
        };
        let llm = create_client(&config.provider, None, api_key)?;

        let store = super::connect_store(config).await?;

        let answerer =
            Answerer::new(embedder, store, llm, &config.model).with_top_k(self.top_k);
        let answer = answerer.answer(&self.question).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&answer)?);
        } else {
            println!("{}", answer.text);
            for source in &answer.sources {
                tracing::info!(source = %source, "Answer source");
            }
        }

        Ok(())
    }
}
