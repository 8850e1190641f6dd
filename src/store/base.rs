use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::StoreConfig;
use crate::models::TokenPair;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("token store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The TokenStore trait abstracts where the bearer tokens are persisted.
///
/// There is no expiry tracking and no rotation: whatever was saved last is
/// handed out until it is cleared.
pub trait TokenStore: Send + Sync {
    /// Persist both tokens, replacing anything stored before.
    fn save(&self, pair: &TokenPair) -> Result<(), StoreError>;
    /// Remove both tokens.
    fn clear(&self) -> Result<(), StoreError>;
    fn access(&self) -> Result<Option<String>, StoreError>;
    fn refresh(&self) -> Result<Option<String>, StoreError>;

    /// A short label for logs.
    fn name(&self) -> &str;

    fn has_access(&self) -> bool {
        matches!(self.access(), Ok(Some(_)))
    }
}

/// Creates a concrete store implementation based on the StoreConfig.
pub fn create_store(config: &StoreConfig) -> Arc<dyn TokenStore> {
    match config {
        StoreConfig::Memory => {
            info!("Using in-memory token store.");
            Arc::new(MemoryStore::new())
        }
        StoreConfig::File(file_config) => {
            info!("Using file token store at '{}'.", file_config.path.display());
            Arc::new(FileStore::new(file_config))
        }
    }
}
