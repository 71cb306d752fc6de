pub mod analysis;
pub mod api;
pub mod config;
pub mod enrichment;
pub mod extraction;
pub mod knowledge;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::analysis::Analyzer;
use crate::config::{AppConfig, ConfigError};
use crate::enrichment::EnrichmentError;
use crate::knowledge::{KnowledgeBase, KnowledgeError};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Enrichment setup error: {0}")]
    Enrichment(#[from] EnrichmentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Initialize tracing from `RUST_LOG`, falling back to the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load configuration and the knowledge base, then serve until Ctrl-C.
///
/// The knowledge base must load completely before anything is served.
/// The analyzer is built outside the async runtime because the enrichment
/// client is blocking.
pub fn run() -> Result<(), StartupError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    let knowledge = Arc::new(KnowledgeBase::load(&config.knowledge_base_path)?);
    let analyzer = Arc::new(Analyzer::from_config(knowledge, &config.enrichment)?);

    if analyzer.enrichment_available() {
        tracing::info!("Interaction enrichment provider configured");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(Arc::clone(&analyzer), &config))
}

async fn serve(analyzer: Arc<Analyzer>, config: &AppConfig) -> Result<(), StartupError> {
    let server = api::start_api_server(analyzer, &config.bind_addr()).await?;
    tracing::info!(addr = %server.addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }

    server.stop().await;
    Ok(())
}
