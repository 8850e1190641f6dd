use serde::Deserialize;

/// Shape of a list response: either a bare array, or a paginated object
/// carrying the items under `results`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Paginated {
        results: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
    },
}

impl<T> ListEnvelope<T> {
    /// Normalize into the plain item list.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Paginated { results, .. } => results,
        }
    }

    /// Total count reported by the backend, or the page length for bare arrays.
    pub fn total(&self) -> u64 {
        match self {
            ListEnvelope::Bare(items) => items.len() as u64,
            ListEnvelope::Paginated { results, count, .. } => {
                count.unwrap_or(results.len() as u64)
            }
        }
    }
}
