use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::index::models::{Account, Container, Database, Snapshot};

use super::ResourceSource;

// ─── Inventory File Format ──────────────────────────────────────────────────

/// Nested inventory document, as produced by an account crawl.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryDoc {
    #[serde(default)]
    accounts: Vec<AccountDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountDoc {
    id: String,
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    resource_group: String,
    #[serde(default)]
    databases: Vec<DatabaseDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseDoc {
    id: String,
    #[serde(default)]
    containers: Vec<ContainerDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContainerDoc {
    id: String,
    partition_key: Option<String>,
}

// ─── JSON File Source ───────────────────────────────────────────────────────

/// Resource source reading a JSON inventory file.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<InventoryDoc> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read inventory file: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse inventory file: {}", self.path.display()))
    }
}

#[async_trait]
impl ResourceSource for JsonFileSource {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let doc = self.load()?;
        Ok(doc.accounts.into_iter().map(account_from_doc).collect())
    }

    async fn crawl(&self) -> Result<Snapshot> {
        Ok(flatten(self.load()?))
    }
}

/// Flatten the nested inventory into the three cached collections,
/// attributing each child to its owning account and database.
fn flatten(doc: InventoryDoc) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for account in doc.accounts {
        for database in &account.databases {
            snapshot.databases.push(Database {
                id: database.id.clone(),
                account_name: account.name.clone(),
                account_resource_group: account.resource_group.clone(),
            });
            for container in &database.containers {
                snapshot.containers.push(Container {
                    id: container.id.clone(),
                    account_name: account.name.clone(),
                    account_resource_group: account.resource_group.clone(),
                    database_name: database.id.clone(),
                    partition_key: container.partition_key.clone(),
                });
            }
        }
        snapshot.accounts.push(account_from_doc(account));
    }
    snapshot
}

fn account_from_doc(doc: AccountDoc) -> Account {
    Account {
        id: doc.id,
        name: doc.name,
        location: doc.location,
        resource_group: doc.resource_group,
    }
}
