use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

use super::backend::IndexBackend;
use super::migration;
use super::models::{Account, Container, Database, IndexMetadata, Snapshot};

/// SQLite-backed index cache.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open or create the index database.
    pub fn open(db_path: &str) -> Result<Self> {
        let parent = Path::new(db_path).parent();
        if let Some(dir) = parent {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open index database at {}", db_path))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

#[async_trait]
impl IndexBackend for SqliteBackend {
    async fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        migration::check_and_migrate(&conn)
    }

    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        // Whole-snapshot replace: clear everything, insert the new set,
        // rewrite metadata, all inside one transaction so readers see
        // either the old snapshot or the new one.
        tx.execute("DELETE FROM accounts", [])?;
        tx.execute("DELETE FROM databases", [])?;
        tx.execute("DELETE FROM containers", [])?;

        for account in &snapshot.accounts {
            tx.execute(
                "INSERT OR REPLACE INTO accounts (id, name, location, resource_group)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    account.id,
                    account.name,
                    account.location,
                    account.resource_group
                ],
            )?;
        }
        for database in &snapshot.databases {
            tx.execute(
                "INSERT OR REPLACE INTO databases (key, id, account_name, account_resource_group)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    database.key().canonical(),
                    database.id,
                    database.account_name,
                    database.account_resource_group
                ],
            )?;
        }
        for container in &snapshot.containers {
            tx.execute(
                "INSERT OR REPLACE INTO containers
                    (key, id, account_name, account_resource_group, database_name, partition_key)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    container.key().canonical(),
                    container.id,
                    container.account_name,
                    container.account_resource_group,
                    container.database_name,
                    container.partition_key
                ],
            )?;
        }

        tx.execute(
            "INSERT INTO index_meta (id, last_updated, total_accounts, total_databases, total_containers)
             VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                last_updated = excluded.last_updated,
                total_accounts = excluded.total_accounts,
                total_databases = excluded.total_databases,
                total_containers = excluded.total_containers",
            params![
                Self::now(),
                snapshot.accounts.len() as i64,
                snapshot.databases.len() as i64,
                snapshot.containers.len() as i64
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    async fn get_snapshot(&self) -> Result<Snapshot> {
        let conn = self.conn.lock().unwrap();

        let mut stmt =
            conn.prepare("SELECT id, name, location, resource_group FROM accounts ORDER BY name")?;
        let accounts = stmt
            .query_map([], |row| {
                Ok(Account {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    location: row.get(2)?,
                    resource_group: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT id, account_name, account_resource_group FROM databases
             ORDER BY account_name, id",
        )?;
        let databases = stmt
            .query_map([], |row| {
                Ok(Database {
                    id: row.get(0)?,
                    account_name: row.get(1)?,
                    account_resource_group: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT id, account_name, account_resource_group, database_name, partition_key
             FROM containers ORDER BY account_name, database_name, id",
        )?;
        let containers = stmt
            .query_map([], |row| {
                Ok(Container {
                    id: row.get(0)?,
                    account_name: row.get(1)?,
                    account_resource_group: row.get(2)?,
                    database_name: row.get(3)?,
                    partition_key: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Snapshot {
            accounts,
            databases,
            containers,
        })
    }

    async fn get_metadata(&self) -> Result<Option<IndexMetadata>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT last_updated, total_accounts, total_databases, total_containers
             FROM index_meta WHERE id = 1",
        )?;
        let result = stmt
            .query_row([], |row| {
                Ok(IndexMetadata {
                    last_updated: row.get(0)?,
                    total_accounts: row.get(1)?,
                    total_databases: row.get(2)?,
                    total_containers: row.get(3)?,
                })
            })
            .ok();
        Ok(result)
    }

    async fn clear_snapshot(&self) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM accounts", [])?;
        tx.execute("DELETE FROM databases", [])?;
        tx.execute("DELETE FROM containers", [])?;
        tx.execute("DELETE FROM index_meta", [])?;
        tx.commit()?;
        Ok(())
    }
}
