use std::sync::Arc;
use tracing::info;
use wordmap_common::{AppConfig, Result};
use wordmap_vector::{EmbeddingStore, VocabFormat};

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Vocabulary, loaded once and never written afterwards
    pub store: Arc<EmbeddingStore>,
}

impl AppState {
    /// Create new application state, loading the vocabulary from disk
    pub fn new(config: AppConfig) -> Result<Self> {
        let format: VocabFormat = config.vocab_format.parse()?;
        info!(
            "Loading vocabulary from {} ({:?})",
            config.vocab_path.display(),
            format
        );
        let store = EmbeddingStore::load(&config.vocab_path, format)?;

        Ok(Self::with_store(config, store))
    }

    /// Create state around an already built store
    pub fn with_store(config: AppConfig, store: EmbeddingStore) -> Self {
        Self {
            config,
            store: Arc::new(store),
        }
    }
}
