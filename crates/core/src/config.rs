//! Configuration management for webrag.
//!
//! Configuration is merged from three layers, later layers winning:
//! an optional YAML config file, environment variables, and CLI flags.
//!
//! The API credential is resolved in exactly one place
//! ([`AppConfig::require_api_key`]) so a missing key surfaces as a
//! typed error instead of ad-hoc checks at every call site.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default Chroma-compatible vector store endpoint.
pub const DEFAULT_STORE_URL: &str = "http://localhost:8000";

/// The single logical collection shared by ingestion and query.
pub const DEFAULT_COLLECTION: &str = "webrag";

/// Default maximum chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation provider (e.g., "openai", "ollama")
    pub provider: String,

    /// Generation model identifier
    pub model: String,

    /// Embedding provider (e.g., "openai", "mock")
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// API key for credentialed providers
    pub api_key: Option<String>,

    /// Vector store base URL (host + port)
    pub store_url: String,

    /// Vector store collection name
    pub collection: String,

    /// Maximum chunk size in characters for ingestion
    pub chunk_size: usize,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    store: Option<StoreSection>,
    ingest: Option<IngestSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    #[serde(rename = "embeddingProvider")]
    embedding_provider: Option<String>,
    #[serde(rename = "embeddingModel")]
    embedding_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreSection {
    url: Option<String>,
    collection: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IngestSection {
    #[serde(rename = "chunkSize")]
    chunk_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            embedding_provider: "openai".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            api_key: None,
            store_url: DEFAULT_STORE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the YAML file (if any) and environment.
    ///
    /// Environment variables:
    /// - `WEBRAG_CONFIG`: path to config file
    /// - `WEBRAG_PROVIDER` / `WEBRAG_MODEL`: generation endpoint
    /// - `WEBRAG_EMBEDDING_PROVIDER` / `WEBRAG_EMBEDDING_MODEL`
    /// - `WEBRAG_API_KEY` or `OPENAI_API_KEY`: model credential
    /// - `WEBRAG_STORE_URL` / `WEBRAG_COLLECTION`: vector store
    /// - `WEBRAG_CHUNK_SIZE`: ingestion chunk size in characters
    /// - `RUST_LOG`, `NO_COLOR`
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("WEBRAG_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("webrag.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("WEBRAG_PROVIDER") {
            config.provider = provider;
        }
        if let Ok(model) = std::env::var("WEBRAG_MODEL") {
            config.model = model;
        }
        if let Ok(provider) = std::env::var("WEBRAG_EMBEDDING_PROVIDER") {
            config.embedding_provider = provider;
        }
        if let Ok(model) = std::env::var("WEBRAG_EMBEDDING_MODEL") {
            config.embedding_model = model;
        }
        if let Ok(store_url) = std::env::var("WEBRAG_STORE_URL") {
            config.store_url = store_url;
        }
        if let Ok(collection) = std::env::var("WEBRAG_COLLECTION") {
            config.collection = collection;
        }
        if let Ok(chunk_size) = std::env::var("WEBRAG_CHUNK_SIZE") {
            config.chunk_size = chunk_size.parse().map_err(|_| {
                AppError::Config(format!("WEBRAG_CHUNK_SIZE is not a number: {}", chunk_size))
            })?;
        }

        config.api_key = std::env::var("WEBRAG_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(provider) = llm.embedding_provider {
                result.embedding_provider = provider;
            }
            if let Some(model) = llm.embedding_model {
                result.embedding_model = model;
            }
        }

        if let Some(store) = config_file.store {
            if let Some(url) = store.url {
                result.store_url = url;
            }
            if let Some(collection) = store.collection {
                result.collection = collection;
            }
        }

        if let Some(ingest) = config_file.ingest {
            if let Some(chunk_size) = ingest.chunk_size {
                result.chunk_size = chunk_size;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides, giving flags precedence over env and file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        store_url: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }
        if let Some(provider) = provider {
            self.provider = provider;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(store_url) = store_url {
            self.store_url = store_url;
        }
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }
        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }
        if no_color {
            self.no_color = true;
        }
        self
    }

    /// Resolve the API credential, failing with a typed error if absent.
    ///
    /// This is the single credential check for both embedding and
    /// generation calls; callers must not probe the environment again.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::MissingCredential(
                "no API key configured; set OPENAI_API_KEY or WEBRAG_API_KEY".to_string(),
            )
        })
    }

    /// Whether the configured providers need a credential at all.
    pub fn needs_credential(&self) -> bool {
        self.provider == "openai" || self.embedding_provider == "openai"
    }
}
