use anyhow::Result;
use rusqlite::Connection;

use super::schema;

/// Check the stored schema version and rebuild the cache when it is stale.
pub fn check_and_migrate(conn: &Connection) -> Result<()> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get::<_, i64>(0),
        )
        .map(|c| c > 0)
        .unwrap_or(false);

    if !table_exists {
        // Fresh install — apply full schema
        apply_schema(conn, "Initial schema")?;
        return Ok(());
    }

    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < schema::SCHEMA_VERSION {
        rebuild(conn, current_version)?;
    }

    Ok(())
}

/// Drop and recreate the cache tables. The index is a disposable cache, so
/// rows written under an older layout are not carried forward — the next
/// build repopulates everything.
fn rebuild(conn: &Connection, from_version: i32) -> Result<()> {
    tracing::info!(
        from_version,
        to_version = schema::SCHEMA_VERSION,
        "Rebuilding index cache for new schema"
    );
    conn.execute_batch(schema::DROP_CACHE_TABLES_SQL)?;
    apply_schema(conn, "Destructive rebuild")
}

fn apply_schema(conn: &Connection, description: &str) -> Result<()> {
    conn.execute_batch(schema::CREATE_TABLES_SQL)?;
    conn.execute_batch(schema::CREATE_INDEXES_SQL)?;
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
        rusqlite::params![schema::SCHEMA_VERSION, now, description],
    )?;
    Ok(())
}
