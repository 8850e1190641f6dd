use std::sync::RwLock;

use tracing::debug;

use super::{StoreError, TokenStore};
use crate::models::TokenPair;

/// A process-local store. Nothing survives a restart.
pub struct MemoryStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tokens: RwLock::new(None),
        }
    }

    /// A store that starts out holding `pair`, as if a previous session left it behind.
    pub fn with_tokens(pair: TokenPair) -> Self {
        MemoryStore {
            tokens: RwLock::new(Some(pair)),
        }
    }

    fn read(&self) -> Option<TokenPair> {
        match self.tokens.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write(&self, value: Option<TokenPair>) {
        match self.tokens.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryStore {
    fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        debug!(event_name = "store.memory.save", event_domain = "store", "tokens saved");
        self.write(Some(pair.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        debug!(event_name = "store.memory.clear", event_domain = "store", "tokens cleared");
        self.write(None);
        Ok(())
    }

    fn access(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read().map(|pair| pair.access))
    }

    fn refresh(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read().map(|pair| pair.refresh))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_tokens() {
        let store = MemoryStore::new();
        assert_eq!(store.access().unwrap(), None);
        assert_eq!(store.refresh().unwrap(), None);
        assert!(!store.has_access());
    }

    #[test]
    fn test_save_then_clear() {
        let store = MemoryStore::new();
        store.save(&TokenPair::new("A", "R")).unwrap();
        assert_eq!(store.access().unwrap().as_deref(), Some("A"));
        assert_eq!(store.refresh().unwrap().as_deref(), Some("R"));

        store.clear().unwrap();
        assert_eq!(store.access().unwrap(), None);
        assert_eq!(store.refresh().unwrap(), None);
    }

    #[test]
    fn test_save_replaces_previous_pair() {
        let store = MemoryStore::with_tokens(TokenPair::new("old", "old-r"));
        store.save(&TokenPair::new("new", "new-r")).unwrap();
        assert_eq!(store.access().unwrap().as_deref(), Some("new"));
        assert_eq!(store.refresh().unwrap().as_deref(), Some("new-r"));
    }
}
