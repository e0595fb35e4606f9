use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use super::backend::IndexBackend;
use super::models::{IndexMetadata, Snapshot};

/// In-memory index cache for hosts without persistent storage.
/// Same visibility contract as the SQLite backend; contents do not survive
/// the process.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    snapshot: Snapshot,
    metadata: Option<IndexMetadata>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IndexBackend for MemoryBackend {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let metadata = IndexMetadata {
            last_updated: chrono::Utc::now().to_rfc3339(),
            total_accounts: snapshot.accounts.len() as i64,
            total_databases: snapshot.databases.len() as i64,
            total_containers: snapshot.containers.len() as i64,
        };
        // Single assignment under the lock: old or new, never a mix.
        let mut state = self.inner.lock().unwrap();
        *state = State {
            snapshot: snapshot.clone(),
            metadata: Some(metadata),
        };
        Ok(())
    }

    async fn get_snapshot(&self) -> Result<Snapshot> {
        Ok(self.inner.lock().unwrap().snapshot.clone())
    }

    async fn get_metadata(&self) -> Result<Option<IndexMetadata>> {
        Ok(self.inner.lock().unwrap().metadata.clone())
    }

    async fn clear_snapshot(&self) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        *state = State::default();
        Ok(())
    }
}
