//! Schema migrations, applied in order on startup.

use rusqlite::Connection;

const MIGRATIONS: &[&str] = &[
    // 1: keyed credential storage
    "CREATE TABLE IF NOT EXISTS credentials (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    );",
];

/// Apply any migrations newer than the database's schema version.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    for (idx, migration) in MIGRATIONS.iter().enumerate() {
        let target = (idx + 1) as i64;
        if version < target {
            conn.execute_batch(migration)?;
            conn.pragma_update(None, "user_version", target)?;
        }
    }

    Ok(())
}
