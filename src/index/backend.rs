use anyhow::Result;
use async_trait::async_trait;

use super::models::{IndexMetadata, Snapshot};

/// Pluggable index cache backend.
/// Implemented by SQLite (durable) and an in-memory store (hosts without
/// persistent storage, tests).
#[async_trait]
pub trait IndexBackend: Send + Sync {
    /// Initialize the backend (create tables, run migrations).
    async fn initialize(&self) -> Result<()>;

    /// Replace the entire cached snapshot and refresh the metadata record.
    /// Either the full replacement becomes visible or the prior snapshot
    /// stays intact; readers never observe a mix of old and new rows.
    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()>;

    /// Full scan of all three collections. Returns empty collections (not
    /// an error) when no snapshot has been built.
    async fn get_snapshot(&self) -> Result<Snapshot>;

    /// Freshness/size record, or None when no snapshot exists.
    async fn get_metadata(&self) -> Result<Option<IndexMetadata>>;

    /// Empty all four collections in one logical operation.
    async fn clear_snapshot(&self) -> Result<()>;
}
