pub mod file;

use anyhow::Result;
use async_trait::async_trait;

use crate::index::models::{Account, Snapshot};

/// The source of truth the index is built from.
///
/// `crawl` feeds the bulk build; `list_accounts` is the degraded path the
/// palette falls back to when no index exists.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Enumerate accounts only.
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Enumerate everything and flatten it into a snapshot.
    async fn crawl(&self) -> Result<Snapshot>;
}
