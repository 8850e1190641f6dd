use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use super::{StoreError, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::config::FileStoreConfig;
use crate::models::TokenPair;

/// Keeps the tokens in a small JSON document keyed like browser storage:
/// `{"access_token": "...", "refresh_token": "..."}`.
///
/// A missing file means no session.
pub struct FileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(config: &FileStoreConfig) -> Self {
        info!("Creating FileStore at '{}'", config.path.display());
        FileStore {
            path: config.path.clone(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        Ok(self.load()?.remove(key).filter(|v| !v.is_empty()))
    }
}

impl TokenStore for FileStore {
    fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut document = BTreeMap::new();
        document.insert(ACCESS_TOKEN_KEY.to_string(), pair.access.clone());
        document.insert(REFRESH_TOKEN_KEY.to_string(), pair.refresh.clone());
        fs::write(&self.path, serde_json::to_vec_pretty(&document)?)?;

        debug!(
            event_name = "store.file.save",
            event_domain = "store",
            path = %self.path.display(),
            "tokens saved"
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        debug!(
            event_name = "store.file.clear",
            event_domain = "store",
            path = %self.path.display(),
            "tokens cleared"
        );
        Ok(())
    }

    fn access(&self) -> Result<Option<String>, StoreError> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn refresh(&self) -> Result<Option<String>, StoreError> {
        self.get(REFRESH_TOKEN_KEY)
    }

    fn name(&self) -> &str {
        "file"
    }
}
