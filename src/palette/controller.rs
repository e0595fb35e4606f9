use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::index::backend::IndexBackend;
use crate::index::models::{Account, Container, Database, Snapshot};
use crate::rank::rank_and_filter;
use crate::source::ResourceSource;

use super::debounce::Debouncer;

/// Scope the palette is searching from. When an account or database is
/// open, containers under it get their own result group.
#[derive(Debug, Clone, Default)]
pub struct PaletteContext {
    pub account_name: Option<String>,
    pub database_name: Option<String>,
}

impl PaletteContext {
    fn is_scoped(&self) -> bool {
        self.account_name.is_some() || self.database_name.is_some()
    }
}

/// Search results grouped by entity type, each capped independently.
#[derive(Debug, Clone, Default)]
pub struct GroupedResults {
    pub accounts: Vec<Account>,
    pub databases: Vec<Database>,
    pub containers: Vec<Container>,
    /// Containers under the context's account/database, ranked on id only.
    pub scoped_containers: Vec<Container>,
    /// True when the cache was empty and accounts came from the live source.
    pub from_fallback: bool,
}

impl GroupedResults {
    pub fn total(&self) -> usize {
        self.accounts.len()
            + self.databases.len()
            + self.containers.len()
            + self.scoped_containers.len()
    }
}

/// Ranks the cached snapshot per entity group, falling back to the live
/// source when no index has been built.
pub struct PaletteController {
    backend: Arc<dyn IndexBackend>,
    source: Arc<dyn ResourceSource>,
    limit: usize,
}

impl PaletteController {
    pub fn new(
        backend: Arc<dyn IndexBackend>,
        source: Arc<dyn ResourceSource>,
        limit: usize,
    ) -> Self {
        Self {
            backend,
            source,
            limit,
        }
    }

    /// One ranking pass. Never fails the navigation flow: a broken cache
    /// degrades to the live source, a broken source to no results.
    pub async fn search(&self, query: &str, context: &PaletteContext) -> Result<GroupedResults> {
        let snapshot = match self.backend.get_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Index cache unavailable, falling back to live source");
                Snapshot::default()
            }
        };

        if snapshot.is_empty() {
            return Ok(self.fallback(query).await);
        }

        let mut results = GroupedResults {
            accounts: rank_and_filter(&snapshot.accounts, query, account_fields, self.limit),
            databases: rank_and_filter(&snapshot.databases, query, database_fields, self.limit),
            containers: rank_and_filter(&snapshot.containers, query, container_fields, self.limit),
            ..Default::default()
        };

        if context.is_scoped() {
            let scoped: Vec<Container> = snapshot
                .containers
                .iter()
                .filter(|c| {
                    context
                        .account_name
                        .as_deref()
                        .map_or(true, |a| c.account_name == a)
                        && context
                            .database_name
                            .as_deref()
                            .map_or(true, |d| c.database_name == d)
                })
                .cloned()
                .collect();
            results.scoped_containers =
                rank_and_filter(&scoped, query, |c: &Container| vec![c.id.clone()], self.limit);
        }

        Ok(results)
    }

    /// Degraded mode: accounts from the live listing, no database or
    /// container search.
    async fn fallback(&self, query: &str) -> GroupedResults {
        let accounts = match self.source.list_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "Live account listing failed");
                Vec::new()
            }
        };
        GroupedResults {
            accounts: rank_and_filter(&accounts, query, account_fields, self.limit),
            from_fallback: true,
            ..Default::default()
        }
    }
}

fn account_fields(account: &Account) -> Vec<String> {
    vec![
        account.name.clone(),
        account.location.clone(),
        account.resource_group.clone(),
    ]
}

fn database_fields(database: &Database) -> Vec<String> {
    vec![database.id.clone(), database.account_name.clone()]
}

fn container_fields(container: &Container) -> Vec<String> {
    vec![
        container.id.clone(),
        container.database_name.clone(),
        container.account_name.clone(),
    ]
}

// ─── Session ────────────────────────────────────────────────────────────────

/// A palette session: debounced input over a controller.
pub struct PaletteSession {
    controller: PaletteController,
    debouncer: Debouncer,
}

impl PaletteSession {
    pub fn new(controller: PaletteController, debounce: Duration) -> Self {
        Self {
            controller,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Feed one input edit. Returns None when the input was superseded
    /// before the quiet period elapsed.
    pub async fn on_input(
        &self,
        query: &str,
        context: &PaletteContext,
    ) -> Result<Option<GroupedResults>> {
        if !self.debouncer.settle().await {
            return Ok(None);
        }
        self.controller.search(query, context).await.map(Some)
    }
}
