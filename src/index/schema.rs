/// SQL DDL for the cosmonav index cache.
///
/// Version history:
///   1 — initial layout, databases and containers keyed by bare id
///   2 — composite-key primary keys (local ids repeat across accounts)
///
/// The cache is disposable: a version bump rebuilds the tables outright
/// rather than carrying old rows forward.

pub const SCHEMA_VERSION: i32 = 2;

pub const CREATE_TABLES_SQL: &str = "
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL,
    description TEXT
);

-- Accounts
CREATE TABLE IF NOT EXISTS accounts (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT NOT NULL DEFAULT '',
    resource_group TEXT NOT NULL DEFAULT ''
);

-- Databases, keyed by account-scoped composite key
CREATE TABLE IF NOT EXISTS databases (
    key TEXT PRIMARY KEY,
    id TEXT NOT NULL,
    account_name TEXT NOT NULL,
    account_resource_group TEXT NOT NULL DEFAULT ''
);

-- Containers, keyed by account/database-scoped composite key
CREATE TABLE IF NOT EXISTS containers (
    key TEXT PRIMARY KEY,
    id TEXT NOT NULL,
    account_name TEXT NOT NULL,
    account_resource_group TEXT NOT NULL DEFAULT '',
    database_name TEXT NOT NULL,
    partition_key TEXT
);

-- Singleton freshness/size record
CREATE TABLE IF NOT EXISTS index_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    last_updated TEXT NOT NULL,
    total_accounts INTEGER NOT NULL DEFAULT 0,
    total_databases INTEGER NOT NULL DEFAULT 0,
    total_containers INTEGER NOT NULL DEFAULT 0
);
";

pub const CREATE_INDEXES_SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_accounts_name ON accounts(name);
CREATE INDEX IF NOT EXISTS idx_databases_account ON databases(account_name);
CREATE INDEX IF NOT EXISTS idx_containers_account ON containers(account_name);
CREATE INDEX IF NOT EXISTS idx_containers_database ON containers(account_name, database_name);
";

/// Cache tables replaced by a destructive migration. `schema_version` itself
/// survives across rebuilds.
pub const DROP_CACHE_TABLES_SQL: &str = "
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS databases;
DROP TABLE IF EXISTS containers;
DROP TABLE IF EXISTS index_meta;
";
