use cosmonav::index::backend::IndexBackend;
use cosmonav::index::memory::MemoryBackend;
use cosmonav::index::models::{Account, Container, Database, Snapshot};
use cosmonav::index::schema;
use cosmonav::index::sqlite::SqliteBackend;
use tempfile::TempDir;

fn account(name: &str) -> Account {
    Account {
        id: format!("/accounts/{name}"),
        name: name.to_string(),
        location: "westus2".to_string(),
        resource_group: "rg".to_string(),
    }
}

fn database(account_name: &str, id: &str) -> Database {
    Database {
        id: id.to_string(),
        account_name: account_name.to_string(),
        account_resource_group: "rg".to_string(),
    }
}

fn container(account_name: &str, database_name: &str, id: &str) -> Container {
    Container {
        id: id.to_string(),
        account_name: account_name.to_string(),
        account_resource_group: "rg".to_string(),
        database_name: database_name.to_string(),
        partition_key: Some("/id".to_string()),
    }
}

fn sample_snapshot() -> Snapshot {
    Snapshot {
        accounts: vec![account("contoso"), account("fabrikam")],
        databases: vec![
            database("contoso", "maindb"),
            database("contoso", "analytics"),
            database("fabrikam", "maindb"),
        ],
        containers: vec![
            container("contoso", "maindb", "orders"),
            container("contoso", "analytics", "events"),
            container("fabrikam", "maindb", "telemetry"),
        ],
    }
}

async fn open_store() -> (TempDir, SqliteBackend) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.db");
    let store = SqliteBackend::open(path.to_str().unwrap()).unwrap();
    store.initialize().await.unwrap();
    (dir, store)
}

fn assert_set_equal<T: PartialEq + std::fmt::Debug>(actual: &[T], expected: &[T]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for item in expected {
        assert!(actual.contains(item), "missing {item:?}");
    }
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let (_dir, store) = open_store().await;
    store.initialize().await.unwrap();
}

#[tokio::test]
async fn test_unbuilt_index_reads_empty() {
    let (_dir, store) = open_store().await;

    let snapshot = store.get_snapshot().await.unwrap();
    assert!(snapshot.is_empty());
    assert!(store.get_metadata().await.unwrap().is_none());
}

#[tokio::test]
async fn test_round_trip_preserves_all_records_and_counts() {
    let (_dir, store) = open_store().await;
    let saved = sample_snapshot();

    store.save_snapshot(&saved).await.unwrap();
    let loaded = store.get_snapshot().await.unwrap();

    assert_set_equal(&loaded.accounts, &saved.accounts);
    assert_set_equal(&loaded.databases, &saved.databases);
    assert_set_equal(&loaded.containers, &saved.containers);

    let meta = store.get_metadata().await.unwrap().unwrap();
    assert_eq!(meta.total_accounts, saved.accounts.len() as i64);
    assert_eq!(meta.total_databases, saved.databases.len() as i64);
    assert_eq!(meta.total_containers, saved.containers.len() as i64);
}

#[tokio::test]
async fn test_save_replaces_wholesale_never_merges() {
    let (_dir, store) = open_store().await;
    store.save_snapshot(&sample_snapshot()).await.unwrap();

    let replacement = Snapshot {
        accounts: vec![account("northwind")],
        databases: vec![database("northwind", "inventory")],
        containers: vec![container("northwind", "inventory", "products")],
    };
    store.save_snapshot(&replacement).await.unwrap();

    let loaded = store.get_snapshot().await.unwrap();
    assert_set_equal(&loaded.accounts, &replacement.accounts);
    assert_set_equal(&loaded.databases, &replacement.databases);
    assert_set_equal(&loaded.containers, &replacement.containers);

    let meta = store.get_metadata().await.unwrap().unwrap();
    assert_eq!(meta.total_accounts, 1);
}

#[tokio::test]
async fn test_clear_empties_everything() {
    let (_dir, store) = open_store().await;
    store.save_snapshot(&sample_snapshot()).await.unwrap();

    store.clear_snapshot().await.unwrap();

    assert!(store.get_snapshot().await.unwrap().is_empty());
    assert!(store.get_metadata().await.unwrap().is_none());
}

#[tokio::test]
async fn test_same_database_name_across_accounts_does_not_collide() {
    let (_dir, store) = open_store().await;
    store.save_snapshot(&sample_snapshot()).await.unwrap();

    let loaded = store.get_snapshot().await.unwrap();
    let maindbs: Vec<_> = loaded
        .databases
        .iter()
        .filter(|d| d.id == "maindb")
        .collect();
    assert_eq!(maindbs.len(), 2);
    assert!(maindbs.iter().any(|d| d.account_name == "contoso"));
    assert!(maindbs.iter().any(|d| d.account_name == "fabrikam"));
}

#[tokio::test]
async fn test_stale_schema_version_triggers_destructive_rebuild() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.db");

    // Lay down a version-1 database: bare-id keys, a leftover row.
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL,
                description TEXT
            );
            CREATE TABLE accounts (id TEXT PRIMARY KEY, name TEXT NOT NULL);
            CREATE TABLE databases (id TEXT PRIMARY KEY, account_name TEXT NOT NULL);
            CREATE TABLE containers (id TEXT PRIMARY KEY, account_name TEXT NOT NULL);
            CREATE TABLE index_meta (id INTEGER PRIMARY KEY, last_updated TEXT NOT NULL);
            INSERT INTO schema_version (version, applied_at) VALUES (1, 'then');
            INSERT INTO accounts (id, name) VALUES ('a1', 'stale-account');",
        )
        .unwrap();
    }

    let store = SqliteBackend::open(path.to_str().unwrap()).unwrap();
    store.initialize().await.unwrap();

    // Old rows are gone, not migrated: the cache is disposable.
    let snapshot = store.get_snapshot().await.unwrap();
    assert!(snapshot.is_empty());
    assert!(store.get_metadata().await.unwrap().is_none());

    // And the store is fully usable at the new version afterwards.
    store.save_snapshot(&sample_snapshot()).await.unwrap();
    assert_eq!(store.get_snapshot().await.unwrap().accounts.len(), 2);

    drop(store);
    let conn = rusqlite::Connection::open(&path).unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, schema::SCHEMA_VERSION);
}

#[tokio::test]
async fn test_current_schema_version_is_not_rebuilt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.db");

    {
        let store = SqliteBackend::open(path.to_str().unwrap()).unwrap();
        store.initialize().await.unwrap();
        store.save_snapshot(&sample_snapshot()).await.unwrap();
    }

    // Reopening at the same version keeps the snapshot.
    let store = SqliteBackend::open(path.to_str().unwrap()).unwrap();
    store.initialize().await.unwrap();
    assert_eq!(store.get_snapshot().await.unwrap().accounts.len(), 2);
}

// The in-memory backend honors the same contract as the SQLite store.

#[tokio::test]
async fn test_memory_backend_round_trip_and_replace() {
    let store = MemoryBackend::new();
    store.initialize().await.unwrap();

    store.save_snapshot(&sample_snapshot()).await.unwrap();
    let meta = store.get_metadata().await.unwrap().unwrap();
    assert_eq!(meta.total_databases, 3);

    let replacement = Snapshot {
        accounts: vec![account("northwind")],
        ..Default::default()
    };
    store.save_snapshot(&replacement).await.unwrap();
    let loaded = store.get_snapshot().await.unwrap();
    assert_eq!(loaded.accounts.len(), 1);
    assert!(loaded.databases.is_empty());
}

#[tokio::test]
async fn test_memory_backend_clear() {
    let store = MemoryBackend::new();
    store.save_snapshot(&sample_snapshot()).await.unwrap();

    store.clear_snapshot().await.unwrap();
    assert!(store.get_snapshot().await.unwrap().is_empty());
    assert!(store.get_metadata().await.unwrap().is_none());
}
