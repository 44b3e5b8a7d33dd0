use crate::core::Storage;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

const STATS_FILE: &str = "stats.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredStats {
    archived: u64,
}

/// Count of pages the user has archived, persisted between runs.
pub struct Stats<S: Storage> {
    storage: S,
    count: u64,
}

impl<S: Storage> Stats<S> {
    pub fn new(storage: S) -> Self {
        Self { storage, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Load the persisted counter, falling back to `initial` when no
    /// counter file exists or it cannot be read.
    pub async fn load(&mut self, initial: u64) -> u64 {
        self.count = match self.storage.read_file(STATS_FILE).await {
            Ok(bytes) => match serde_json::from_slice::<StoredStats>(&bytes) {
                Ok(stored) => stored.archived,
                Err(e) => {
                    tracing::warn!("Unreadable stats file, starting from {}: {}", initial, e);
                    initial
                }
            },
            Err(_) => initial,
        };
        self.count
    }

    /// Record one more archived page and persist the new count.
    pub async fn update(&mut self) -> Result<u64> {
        self.count += 1;
        let bytes = serde_json::to_vec(&StoredStats {
            archived: self.count,
        })?;
        self.storage.write_file(STATS_FILE, &bytes).await?;
        Ok(self.count)
    }
}
