use serde::{Deserialize, Serialize};

// ─── Cached Entities ────────────────────────────────────────────────────────

/// A Cosmos DB account as stored in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub location: String,
    pub resource_group: String,
}

/// A database owned by one account. The local id is not globally unique;
/// identity is `(account_name, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    pub account_name: String,
    pub account_resource_group: String,
}

impl Database {
    pub fn key(&self) -> DatabaseKey {
        DatabaseKey {
            account_name: self.account_name.clone(),
            database_id: self.id.clone(),
        }
    }
}

/// A container owned by one database within one account. Identity is
/// `(account_name, database_name, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub account_name: String,
    pub account_resource_group: String,
    pub database_name: String,
    pub partition_key: Option<String>,
}

impl Container {
    pub fn key(&self) -> ContainerKey {
        ContainerKey {
            account_name: self.account_name.clone(),
            database_name: self.database_name.clone(),
            container_id: self.id.clone(),
        }
    }
}

// ─── Composite Keys ─────────────────────────────────────────────────────────

/// Identity of a database record, scoped by its owning account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseKey {
    pub account_name: String,
    pub database_id: String,
}

impl DatabaseKey {
    /// Canonical string form, used only as the storage primary key.
    pub fn canonical(&self) -> String {
        format!("{}/{}", self.account_name, self.database_id)
    }
}

/// Identity of a container record, scoped by account and database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerKey {
    pub account_name: String,
    pub database_name: String,
    pub container_id: String,
}

impl ContainerKey {
    pub fn canonical(&self) -> String {
        format!(
            "{}/{}/{}",
            self.account_name, self.database_name, self.container_id
        )
    }
}

// ─── Snapshot ───────────────────────────────────────────────────────────────

/// The unit of cache replacement: all three collections travel together.
/// There is no per-record update path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub databases: Vec<Database>,
    pub containers: Vec<Container>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.databases.is_empty() && self.containers.is_empty()
    }
}

// ─── Metadata ───────────────────────────────────────────────────────────────

/// Freshness and size of the cached snapshot. Absent until a build has
/// succeeded; counts always equal the collection cardinalities after a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub last_updated: String,
    pub total_accounts: i64,
    pub total_databases: i64,
    pub total_containers: i64,
}
