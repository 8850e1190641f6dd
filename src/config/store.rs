use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The token store backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema, Default)]
#[serde(tag = "type")]
pub enum StoreConfig {
    /// Tokens live only as long as the process.
    #[serde(rename = "memory")]
    #[default]
    Memory,
    /// Tokens are kept in a JSON file so a later run picks the session back up.
    #[serde(rename = "file")]
    File(FileStoreConfig),
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStoreConfig {
    pub path: PathBuf,
}
